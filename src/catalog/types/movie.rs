use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A movie as it appears in listings (rows, grids, search results)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Provider ID, always positive
    pub id: i64,
    /// Display title
    pub title: String,
    /// Poster image path relative to the image base URL
    pub poster_path: Option<String>,
    /// Backdrop image path relative to the image base URL
    pub backdrop_path: Option<String>,
    /// Average vote (0-10 scale), stored at full precision
    pub rating: f64,
    /// Primary release date
    pub release_date: Option<NaiveDate>,
    /// Short description
    pub overview: String,
    /// Genre IDs in provider order
    pub genre_ids: Vec<i64>,
}

impl MovieSummary {
    /// Create a summary with the required fields
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            backdrop_path: None,
            rating: 0.0,
            release_date: None,
            overview: String::new(),
            genre_ids: Vec::new(),
        }
    }

    /// Builder pattern: set rating
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Builder pattern: set release date
    pub fn with_release_date(mut self, date: Option<NaiveDate>) -> Self {
        self.release_date = date;
        self
    }

    /// Builder pattern: set overview
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    /// Builder pattern: set genre IDs
    pub fn with_genres(mut self, genre_ids: Vec<i64>) -> Self {
        self.genre_ids = genre_ids;
        self
    }

    /// Release year, if the release date is known
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    /// Rating rounded to one decimal place for display
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }
}

/// Movie genre
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

impl Genre {
    /// Reserved id for the "no filter selected" entry
    pub const ALL_ID: i64 = 0;

    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The synthetic "All" entry shown first in genre filters
    pub fn all() -> Self {
        Self::new(Self::ALL_ID, "All")
    }

    /// Whether this is the "All" entry
    pub fn is_all(&self) -> bool {
        self.id == Self::ALL_ID
    }
}

/// Trending time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movie listing shown as a row on the home feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Trending,
    Popular,
    #[serde(rename = "new")]
    NewReleases,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 3] = [Self::Trending, Self::Popular, Self::NewReleases];

    /// Maximum number of movies shown in a home row
    pub const ROW_LIMIT: usize = 10;

    /// Stable identifier
    pub fn id(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Popular => "popular",
            Self::NewReleases => "new",
        }
    }

    /// Row heading
    pub fn title(self) -> &'static str {
        match self {
            Self::Trending => "Trending Now",
            Self::Popular => "Popular Movies",
            Self::NewReleases => "New Releases",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_label_rounds_to_one_decimal() {
        let movie = MovieSummary::new(1, "Inception").with_rating(8.8456);
        assert_eq!(movie.rating_label(), "8.8");
        assert_eq!(movie.rating, 8.8456);

        let unrated = MovieSummary::new(2, "Unrated");
        assert_eq!(unrated.rating_label(), "0.0");
    }

    #[test]
    fn test_release_year() {
        let movie = MovieSummary::new(1, "The Godfather")
            .with_release_date(NaiveDate::from_ymd_opt(1972, 3, 14));
        assert_eq!(movie.release_year(), Some(1972));
        assert_eq!(MovieSummary::new(2, "Unknown").release_year(), None);
    }

    #[test]
    fn test_all_genre_sentinel() {
        let all = Genre::all();
        assert_eq!(all.id, 0);
        assert_eq!(all.name, "All");
        assert!(all.is_all());
        assert!(!Genre::new(28, "Action").is_all());
    }

    #[test]
    fn test_category_ids_and_titles() {
        assert_eq!(Category::NewReleases.id(), "new");
        assert_eq!(Category::Trending.title(), "Trending Now");
        assert_eq!(
            Category::ALL.iter().map(|c| c.id()).collect::<Vec<_>>(),
            vec!["trending", "popular", "new"]
        );
    }
}
