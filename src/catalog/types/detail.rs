use super::{Genre, MovieSummary};
use serde::{Deserialize, Serialize};

/// Full record shown on a movie's detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// Listing fields
    #[serde(flatten)]
    pub summary: MovieSummary,
    /// Runtime in minutes
    pub runtime_minutes: u32,
    /// Genres with names, in provider order
    pub genres: Vec<Genre>,
    /// Tagline
    pub tagline: Option<String>,
    /// Production budget in USD
    pub budget: u64,
    /// Box office revenue in USD
    pub revenue: u64,
    /// Official homepage
    pub homepage: Option<String>,
    /// Production companies
    pub production_companies: Vec<Company>,

    // Credits
    /// Cast in billing order
    pub cast: Vec<CastMember>,
    /// Crew members
    pub crew: Vec<CrewMember>,

    /// Trailers, teasers and clips
    pub videos: Vec<Video>,
}

impl MovieDetail {
    /// Wrap a summary with empty detail fields
    pub fn from_summary(summary: MovieSummary) -> Self {
        Self {
            summary,
            runtime_minutes: 0,
            genres: Vec::new(),
            tagline: None,
            budget: 0,
            revenue: 0,
            homepage: None,
            production_companies: Vec::new(),
            cast: Vec::new(),
            crew: Vec::new(),
            videos: Vec::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.summary.id
    }

    /// The credited director, if any. Missing directors are normal.
    pub fn director(&self) -> Option<&CrewMember> {
        self.crew.iter().find(|c| c.job == "Director")
    }

    /// First `n` cast members in billing order
    pub fn top_cast(&self, n: usize) -> &[CastMember] {
        &self.cast[..n.min(self.cast.len())]
    }

    /// First YouTube trailer
    pub fn trailer(&self) -> Option<&Video> {
        self.videos
            .iter()
            .find(|v| v.site == "YouTube" && v.kind == "Trailer")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    pub job: String,
    pub department: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    /// Site-specific key (YouTube video ID)
    pub key: String,
    pub name: String,
    /// Hosting site, e.g. "YouTube"
    pub site: String,
    /// Video type, e.g. "Trailer", "Teaser"
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub logo_path: Option<String>,
}
