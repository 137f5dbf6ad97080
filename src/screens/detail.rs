use crate::catalog::{CatalogDataSource, CrewMember, MovieDetail};
use crate::state::{Region, ResolutionPolicy, ViewState};
use tokio::task::JoinHandle;
use tracing::warn;

/// Detail page for one movie
pub struct DetailView {
    movie_id: i64,
    region: Region<MovieDetail>,
}

impl DetailView {
    /// Start loading `movie_id`. Ids must be positive; anything else settles
    /// in the error state without a request.
    pub fn open(source: CatalogDataSource, movie_id: i64, policy: ResolutionPolicy) -> Self {
        let region = Region::new(format!("detail:{movie_id}"), policy);

        if movie_id <= 0 {
            warn!("Refusing to load detail for invalid movie id {}", movie_id);
            region.fail_now();
        } else {
            region.start(move || {
                let source = source.clone();
                async move { source.fetch_detail(movie_id).await.map(|d| vec![d]) }
            });
        }

        Self { movie_id, region }
    }

    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }

    /// Retry button. `None` when there is nothing to retry (invalid id).
    pub fn retry(&self) -> Option<JoinHandle<()>> {
        self.region.retry()
    }

    pub fn state(&self) -> ViewState<MovieDetail> {
        self.region.snapshot()
    }

    pub fn region(&self) -> &Region<MovieDetail> {
        &self.region
    }

    pub fn detail(&self) -> Option<MovieDetail> {
        self.region.snapshot().payload.into_iter().next()
    }

    /// Credited director, if loaded
    pub fn director(&self) -> Option<CrewMember> {
        self.detail().and_then(|d| d.director().cloned())
    }

    pub fn director_name(&self) -> Option<String> {
        self.director().map(|c| c.name)
    }

    pub async fn settled(&self) {
        self.region.settled().await;
    }
}
