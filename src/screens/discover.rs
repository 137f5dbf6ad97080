use crate::catalog::{CatalogDataSource, Genre, MovieSummary, Page};
use crate::state::{QueryDebouncer, Region, ResolutionPolicy, ViewState};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Options for a discover screen
#[derive(Debug, Clone, Copy)]
pub struct DiscoverOptions {
    pub debounce: Duration,
    pub policy: ResolutionPolicy,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            debounce: QueryDebouncer::DEFAULT_DELAY,
            policy: ResolutionPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Filter {
    selected_genre: Option<i64>,
    searching: bool,
    query: String,
}

/// Which listing the movie grid shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Search(String),
    Genre(i64),
    Popular,
}

impl Filter {
    fn listing(&self) -> Listing {
        if self.searching && !self.query.is_empty() {
            return Listing::Search(self.query.clone());
        }
        match self.selected_genre {
            Some(id) if id != Genre::ALL_ID => Listing::Genre(id),
            _ => Listing::Popular,
        }
    }
}

struct DiscoverInner {
    source: CatalogDataSource,
    genres: Region<Genre>,
    movies: Region<MovieSummary>,
    debouncer: QueryDebouncer,
    filter: Mutex<Filter>,
}

impl DiscoverInner {
    fn apply_stable_query(&self, query: &str) -> JoinHandle<()> {
        {
            let mut filter = self.filter.lock();
            filter.query = query.trim().to_string();
            filter.searching = !filter.query.is_empty();
        }
        self.refresh()
    }

    fn refresh(&self) -> JoinHandle<()> {
        let listing = self.filter.lock().listing();
        debug!("Discover listing: {:?}", listing);
        let source = self.source.clone();

        match listing {
            Listing::Search(query) => self.movies.start(move || {
                let source = source.clone();
                let query = query.clone();
                async move { source.search_by_title(&query, Page::FIRST).await }
            }),
            Listing::Genre(genre_id) => self.movies.start(move || {
                let source = source.clone();
                async move { source.fetch_by_genre(genre_id, Page::FIRST).await }
            }),
            Listing::Popular => self.movies.start(move || {
                let source = source.clone();
                async move { source.fetch_popular(Page::FIRST).await }
            }),
        }
    }
}

/// Browse screen: genre filter chips, a search box and a movie grid.
///
/// Search and genre filtering are exclusive; a non-empty stabilized query
/// takes priority over the selected genre.
pub struct Discover {
    inner: Arc<DiscoverInner>,
    listener: JoinHandle<()>,
}

impl Discover {
    /// Build the screen and start loading genres and popular movies
    pub fn mount(source: CatalogDataSource, options: DiscoverOptions) -> Self {
        let (debouncer, mut queries) = QueryDebouncer::new(options.debounce);

        let inner = Arc::new(DiscoverInner {
            source: source.clone(),
            genres: Region::new("genres", options.policy),
            movies: Region::new("discover", options.policy),
            debouncer,
            filter: Mutex::new(Filter::default()),
        });

        inner.genres.start(move || {
            let source = source.clone();
            async move { source.genre_filters().await }
        });
        inner.refresh();

        let listener = tokio::spawn({
            let inner = Arc::clone(&inner);
            async move {
                while let Some(query) = queries.recv().await {
                    inner.apply_stable_query(&query);
                }
            }
        });

        Self { inner, listener }
    }

    /// Search box edit; the grid follows once typing pauses
    pub fn on_query_input(&self, text: impl Into<String>) {
        self.inner.debouncer.on_input(text);
    }

    /// Clear button: leave search mode now, the grid reverts after the quiet period
    pub fn clear_query(&self) {
        self.inner.filter.lock().searching = false;
        self.inner.debouncer.on_input("");
    }

    /// Pick a genre chip. Clears the search and reloads immediately.
    pub fn select_genre(&self, genre_id: i64) -> JoinHandle<()> {
        self.inner.debouncer.clear();
        {
            let mut filter = self.inner.filter.lock();
            filter.selected_genre = Some(genre_id);
            filter.searching = false;
            filter.query.clear();
        }
        self.inner.refresh()
    }

    /// Reload the active listing: search, then genre, then popular
    pub fn retry(&self) -> JoinHandle<()> {
        self.inner.refresh()
    }

    /// Re-fetch the genre chips
    pub fn retry_genres(&self) -> Option<JoinHandle<()>> {
        self.inner.genres.retry()
    }

    pub fn listing(&self) -> Listing {
        self.inner.filter.lock().listing()
    }

    pub fn is_searching(&self) -> bool {
        self.inner.filter.lock().searching
    }

    pub fn selected_genre(&self) -> Option<i64> {
        self.inner.filter.lock().selected_genre
    }

    pub fn raw_query(&self) -> String {
        self.inner.debouncer.raw_query()
    }

    pub fn movies(&self) -> ViewState<MovieSummary> {
        self.inner.movies.snapshot()
    }

    pub fn genres(&self) -> ViewState<Genre> {
        self.inner.genres.snapshot()
    }

    pub fn movies_region(&self) -> &Region<MovieSummary> {
        &self.inner.movies
    }

    pub fn genres_region(&self) -> &Region<Genre> {
        &self.inner.genres
    }
}

impl Drop for Discover {
    fn drop(&mut self) {
        self.listener.abort();
    }
}
