use crate::catalog::{CatalogDataSource, Category, MovieSummary, Page, TimeWindow};
use crate::state::{Region, ResolutionPolicy, ViewState};
use futures::future::join_all;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

/// Landing page: three category rows plus a featured slot.
///
/// Every row is its own [`Region`]; they are launched together and settle in
/// whatever order the catalog answers.
pub struct HomeFeed {
    source: CatalogDataSource,
    trending: Region<MovieSummary>,
    popular: Region<MovieSummary>,
    new_releases: Region<MovieSummary>,
    featured: Region<MovieSummary>,
}

/// Point-in-time view of the whole feed
#[derive(Debug, Clone, Serialize)]
pub struct HomeSnapshot {
    pub featured: ViewState<MovieSummary>,
    pub categories: Vec<(Category, ViewState<MovieSummary>)>,
}

impl HomeFeed {
    pub fn new(source: CatalogDataSource, policy: ResolutionPolicy) -> Self {
        Self {
            source,
            trending: Region::new(Category::Trending.id(), policy),
            popular: Region::new(Category::Popular.id(), policy),
            new_releases: Region::new(Category::NewReleases.id(), policy),
            featured: Region::new("featured", policy),
        }
    }

    /// Start every category and the featured slot without waiting on any of them
    pub fn launch(&self) -> Vec<JoinHandle<()>> {
        info!("Launching home feed from {}", self.source.source_id());

        let mut handles: Vec<JoinHandle<()>> = Category::ALL
            .into_iter()
            .map(|category| self.start_category(category))
            .collect();
        handles.push(self.start_featured());
        handles
    }

    pub fn category(&self, category: Category) -> &Region<MovieSummary> {
        match category {
            Category::Trending => &self.trending,
            Category::Popular => &self.popular,
            Category::NewReleases => &self.new_releases,
        }
    }

    pub fn featured(&self) -> &Region<MovieSummary> {
        &self.featured
    }

    /// Featured movie, once loaded
    pub fn featured_movie(&self) -> Option<MovieSummary> {
        self.featured.snapshot().payload.into_iter().next()
    }

    /// Movies to show in a row, capped at [`Category::ROW_LIMIT`]
    pub fn row(&self, category: Category) -> Vec<MovieSummary> {
        let mut movies = self.category(category).snapshot().payload;
        movies.truncate(Category::ROW_LIMIT);
        movies
    }

    /// Re-run one category; its siblings are left alone
    pub fn retry(&self, category: Category) -> JoinHandle<()> {
        self.category(category)
            .retry()
            .unwrap_or_else(|| self.start_category(category))
    }

    pub fn retry_featured(&self) -> JoinHandle<()> {
        self.featured
            .retry()
            .unwrap_or_else(|| self.start_featured())
    }

    pub fn snapshot(&self) -> HomeSnapshot {
        HomeSnapshot {
            featured: self.featured.snapshot(),
            categories: Category::ALL
                .into_iter()
                .map(|c| (c, self.category(c).snapshot()))
                .collect(),
        }
    }

    /// Wait until every region has left the loading state
    pub async fn settled(&self) {
        let mut regions: Vec<&Region<MovieSummary>> =
            Category::ALL.into_iter().map(|c| self.category(c)).collect();
        regions.push(&self.featured);

        join_all(regions.into_iter().map(Region::settled)).await;
    }

    fn start_category(&self, category: Category) -> JoinHandle<()> {
        let source = self.source.clone();
        let region = self.category(category);

        match category {
            Category::Trending => region.start(move || {
                let source = source.clone();
                async move { source.fetch_trending(TimeWindow::Week).await }
            }),
            Category::Popular => region.start(move || {
                let source = source.clone();
                async move { source.fetch_popular(Page::FIRST).await }
            }),
            Category::NewReleases => region.start(move || {
                let source = source.clone();
                async move { source.fetch_new_releases(Page::FIRST).await }
            }),
        }
    }

    fn start_featured(&self) -> JoinHandle<()> {
        let source = self.source.clone();
        self.featured.start(move || {
            let source = source.clone();
            async move {
                let trending = source.fetch_trending(TimeWindow::Day).await?;
                Ok(trending.into_iter().take(1).collect())
            }
        })
    }
}
