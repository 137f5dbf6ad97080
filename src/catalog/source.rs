use crate::catalog::{
    CatalogError, Result,
    types::{Genre, MovieDetail, MovieSummary, TimeWindow},
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Fallible access to a remote movie catalog.
///
/// Implementations report every transport, status and decode failure;
/// [`CatalogDataSource`](crate::catalog::CatalogDataSource) decides what the
/// caller sees.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Source identifier (e.g., "tmdb")
    fn id(&self) -> &'static str;

    /// Popular movies
    async fn popular(&self, page: u32) -> Result<Vec<MovieSummary>>;

    /// Trending movies for a time window
    async fn trending(&self, window: TimeWindow) -> Result<Vec<MovieSummary>>;

    /// Movies released between `from` and `to` (inclusive), newest first
    async fn released_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        page: u32,
    ) -> Result<Vec<MovieSummary>>;

    /// Movies tagged with a genre
    async fn by_genre(&self, genre_id: i64, page: u32) -> Result<Vec<MovieSummary>>;

    /// Title search
    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieSummary>>;

    /// Genre list
    async fn genres(&self) -> Result<Vec<Genre>>;

    /// Full detail record including credits and videos
    async fn detail(&self, id: i64) -> Result<MovieDetail>;
}

/// Source used when no remote API is configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSource;

impl UnconfiguredSource {
    fn unavailable<T>() -> Result<T> {
        Err(CatalogError::Config(
            "no TMDB api key or access token configured".to_string(),
        ))
    }
}

#[async_trait]
impl MovieSource for UnconfiguredSource {
    fn id(&self) -> &'static str {
        "unconfigured"
    }

    async fn popular(&self, _page: u32) -> Result<Vec<MovieSummary>> {
        Self::unavailable()
    }

    async fn trending(&self, _window: TimeWindow) -> Result<Vec<MovieSummary>> {
        Self::unavailable()
    }

    async fn released_between(
        &self,
        _from: NaiveDate,
        _to: NaiveDate,
        _page: u32,
    ) -> Result<Vec<MovieSummary>> {
        Self::unavailable()
    }

    async fn by_genre(&self, _genre_id: i64, _page: u32) -> Result<Vec<MovieSummary>> {
        Self::unavailable()
    }

    async fn search(&self, _query: &str, _page: u32) -> Result<Vec<MovieSummary>> {
        Self::unavailable()
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        Self::unavailable()
    }

    async fn detail(&self, _id: i64) -> Result<MovieDetail> {
        Self::unavailable()
    }
}
