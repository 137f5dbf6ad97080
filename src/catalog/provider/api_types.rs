use crate::catalog::types::{
    CastMember, Company, CrewMember, Genre, MovieDetail, MovieSummary, Video,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

// TMDB sends "" for unknown dates
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}

// Paged list responses
#[derive(Debug, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub page: i32,
    #[serde(default)]
    pub total_pages: i32,
    #[serde(default)]
    pub total_results: i32,
}

#[derive(Debug, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<GenreItem>,
}

#[derive(Debug, Deserialize)]
pub struct MovieResult {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

impl From<MovieResult> for MovieSummary {
    fn from(movie: MovieResult) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            poster_path: movie.poster_path,
            backdrop_path: movie.backdrop_path,
            rating: movie.vote_average.unwrap_or_default().clamp(0.0, 10.0),
            release_date: movie.release_date,
            overview: movie.overview.unwrap_or_default(),
            genre_ids: movie.genre_ids,
        }
    }
}

// Detail response (append_to_response=videos,credits)
#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    pub runtime: Option<u32>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreItem>,
    #[serde(default)]
    pub production_companies: Vec<CompanyItem>,
    pub videos: Option<VideoList>,
    pub credits: Option<Credits>,
}

impl From<MovieDetails> for MovieDetail {
    fn from(movie: MovieDetails) -> Self {
        let credits = movie.credits.unwrap_or_default();

        Self {
            summary: MovieSummary {
                id: movie.id,
                title: movie.title,
                poster_path: movie.poster_path,
                backdrop_path: movie.backdrop_path,
                rating: movie.vote_average.unwrap_or_default().clamp(0.0, 10.0),
                release_date: movie.release_date,
                overview: movie.overview.unwrap_or_default(),
                genre_ids: movie.genres.iter().map(|g| g.id).collect(),
            },
            runtime_minutes: movie.runtime.unwrap_or_default(),
            genres: movie.genres.into_iter().map(Genre::from).collect(),
            tagline: movie.tagline.filter(|t| !t.is_empty()),
            budget: movie.budget.unwrap_or_default(),
            revenue: movie.revenue.unwrap_or_default(),
            homepage: movie.homepage.filter(|h| !h.is_empty()),
            production_companies: movie
                .production_companies
                .into_iter()
                .map(|c| Company {
                    id: c.id,
                    name: c.name,
                    logo_path: c.logo_path,
                })
                .collect(),
            cast: credits
                .cast
                .into_iter()
                .map(|c| CastMember {
                    id: c.id,
                    name: c.name,
                    character: c.character.unwrap_or_default(),
                    profile_path: c.profile_path,
                })
                .collect(),
            crew: credits
                .crew
                .into_iter()
                .map(|c| CrewMember {
                    id: c.id,
                    name: c.name,
                    job: c.job.unwrap_or_default(),
                    department: c.department.unwrap_or_default(),
                    profile_path: c.profile_path,
                })
                .collect(),
            videos: movie
                .videos
                .map(|v| v.results)
                .unwrap_or_default()
                .into_iter()
                .map(|v| Video {
                    id: v.id,
                    key: v.key,
                    name: v.name.unwrap_or_default(),
                    site: v.site,
                    kind: v.kind.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

// Common types
#[derive(Debug, Deserialize)]
pub struct GenreItem {
    pub id: i64,
    pub name: String,
}

impl From<GenreItem> for Genre {
    fn from(genre: GenreItem) -> Self {
        Genre::new(genre.id, genre.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompanyItem {
    pub id: i64,
    pub name: String,
    pub logo_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub key: String,
    pub name: Option<String>,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastItem>,
    #[serde(default)]
    pub crew: Vec<CrewItem>,
}

#[derive(Debug, Deserialize)]
pub struct CastItem {
    pub id: i64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CrewItem {
    pub id: i64,
    pub name: String,
    pub job: Option<String>,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_result_tolerates_blank_fields() {
        let json = r#"{
            "id": 42,
            "title": "Untitled",
            "release_date": "",
            "poster_path": null,
            "backdrop_path": null,
            "overview": null,
            "vote_average": 7.26
        }"#;

        let movie: MovieSummary = serde_json::from_str::<MovieResult>(json).unwrap().into();
        assert_eq!(movie.id, 42);
        assert!(movie.release_date.is_none());
        assert!(movie.overview.is_empty());
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.rating_label(), "7.3");
    }

    #[test]
    fn test_details_without_videos_or_credits() {
        let json = r#"{
            "id": 7,
            "title": "Bare",
            "release_date": "2024-05-01",
            "runtime": 95,
            "genres": [{"id": 35, "name": "Comedy"}]
        }"#;

        let detail: MovieDetail = serde_json::from_str::<MovieDetails>(json).unwrap().into();
        assert_eq!(detail.id(), 7);
        assert_eq!(detail.runtime_minutes, 95);
        assert_eq!(detail.summary.genre_ids, vec![35]);
        assert!(detail.videos.is_empty());
        assert!(detail.cast.is_empty());
        assert!(detail.director().is_none());
    }
}
