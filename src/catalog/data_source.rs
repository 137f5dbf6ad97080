use crate::catalog::{
    Result,
    sample::{sample_detail, sample_genres, sample_movies},
    source::MovieSource,
    types::{Genre, MovieDetail, MovieSummary, TimeWindow},
};
use chrono::{Months, NaiveDate};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// What the data source does when the remote source fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnFailure {
    /// Log the failure and serve built-in sample data
    #[default]
    Fallback,
    /// Return the failure to the caller
    Propagate,
}

/// 1-based page number, passed through to the remote API as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Page(u32);

impl Page {
    pub const FIRST: Page = Page(1);

    /// Page 0 is clamped to the first page
    pub fn new(page: u32) -> Self {
        Self(page.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<u32> for Page {
    fn from(page: u32) -> Self {
        Self::new(page)
    }
}

/// Source of "today" for date-windowed queries
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Inclusive release-date window for the "new releases" listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewReleaseWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl NewReleaseWindow {
    /// How far back a release still counts as new
    pub const SPAN_MONTHS: u32 = 2;

    /// Window `[today - 2 months, today]`
    pub fn ending(today: NaiveDate) -> Self {
        let from = today
            .checked_sub_months(Months::new(Self::SPAN_MONTHS))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Keep dated movies inside the window, newest first
    pub fn apply(&self, mut movies: Vec<MovieSummary>) -> Vec<MovieSummary> {
        movies.retain(|m| m.release_date.is_some_and(|d| self.contains(d)));
        movies.sort_by(|a, b| b.release_date.cmp(&a.release_date));
        movies
    }
}

/// Typed catalog operations over a [`MovieSource`] with a failure policy.
///
/// Under [`OnFailure::Fallback`] no operation returns `Err`: failures are
/// logged and replaced with sample data so every region stays renderable.
#[derive(Clone)]
pub struct CatalogDataSource {
    source: Arc<dyn MovieSource>,
    policy: OnFailure,
    clock: Clock,
}

impl CatalogDataSource {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self {
            source,
            policy: OnFailure::default(),
            clock: Arc::new(|| chrono::Local::now().date_naive()),
        }
    }

    /// Set the failure policy
    pub fn with_policy(mut self, policy: OnFailure) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the clock used for date windows
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn policy(&self) -> OnFailure {
        self.policy
    }

    pub fn source_id(&self) -> &'static str {
        self.source.id()
    }

    /// Current "new releases" window
    pub fn new_release_window(&self) -> NewReleaseWindow {
        NewReleaseWindow::ending((self.clock)())
    }

    pub async fn fetch_popular(&self, page: Page) -> Result<Vec<MovieSummary>> {
        let result = self.source.popular(page.get()).await;
        self.settle("popular", result, sample_movies)
    }

    pub async fn fetch_trending(&self, window: TimeWindow) -> Result<Vec<MovieSummary>> {
        let result = self.source.trending(window).await;
        self.settle("trending", result, sample_movies)
    }

    /// Movies released within the last two months, newest first
    pub async fn fetch_new_releases(&self, page: Page) -> Result<Vec<MovieSummary>> {
        let window = self.new_release_window();
        let result = self
            .source
            .released_between(window.from, window.to, page.get())
            .await
            .map(|movies| window.apply(movies));
        self.settle("new releases", result, sample_movies)
    }

    pub async fn fetch_by_genre(&self, genre_id: i64, page: Page) -> Result<Vec<MovieSummary>> {
        let result = self.source.by_genre(genre_id, page.get()).await;
        self.settle("genre listing", result, sample_movies)
    }

    pub async fn search_by_title(&self, query: &str, page: Page) -> Result<Vec<MovieSummary>> {
        let result = self.source.search(query, page.get()).await;
        self.settle("search", result, sample_movies)
    }

    pub async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        let result = self.source.genres().await;
        self.settle("genres", result, sample_genres)
    }

    /// Genre filter entries: "All" first, then the catalog genres
    pub async fn genre_filters(&self) -> Result<Vec<Genre>> {
        let genres = self.fetch_genres().await?;
        let mut filters = Vec::with_capacity(genres.len() + 1);
        filters.push(Genre::all());
        filters.extend(genres.into_iter().filter(|g| !g.is_all()));
        Ok(filters)
    }

    pub async fn fetch_detail(&self, id: i64) -> Result<MovieDetail> {
        let result = self.source.detail(id).await;
        self.settle("movie detail", result, || sample_detail(id))
    }

    fn settle<T>(
        &self,
        operation: &str,
        result: Result<T>,
        fallback: impl FnOnce() -> T,
    ) -> Result<T> {
        match (result, self.policy) {
            (Ok(value), _) => Ok(value),
            (Err(e), OnFailure::Fallback) => {
                warn!(
                    "Error fetching {} from {}: {}; using sample data",
                    operation,
                    self.source.id(),
                    e
                );
                Ok(fallback())
            }
            (Err(e), OnFailure::Propagate) => {
                debug!("Error fetching {} from {}: {}", operation, self.source.id(), e);
                Err(e)
            }
        }
    }
}
