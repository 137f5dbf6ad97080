//! Scripted [`MovieSource`] for tests

use crate::catalog::{
    CatalogError, Result,
    source::MovieSource,
    types::{Genre, MovieDetail, MovieSummary, TimeWindow},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Popular,
    Trending,
    NewReleases,
    ByGenre,
    Search,
    Genres,
    Detail,
}

/// One recorded call: operation plus its main argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: Op,
    pub arg: String,
}

#[derive(Default)]
pub struct ScriptedSource {
    delays: HashMap<Op, Duration>,
    failing: Mutex<HashSet<Op>>,
    releases: Vec<MovieSummary>,
    genres: Option<Vec<Genre>>,
    trending_day: Option<Vec<MovieSummary>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, op: Op, ms: u64) -> Self {
        self.delays.insert(op, Duration::from_millis(ms));
        self
    }

    pub fn failing(self, op: Op) -> Self {
        self.failing.lock().insert(op);
        self
    }

    pub fn failing_all(self) -> Self {
        self.failing.lock().extend([
            Op::Popular,
            Op::Trending,
            Op::NewReleases,
            Op::ByGenre,
            Op::Search,
            Op::Genres,
            Op::Detail,
        ]);
        self
    }

    pub fn with_releases(mut self, releases: Vec<MovieSummary>) -> Self {
        self.releases = releases;
        self
    }

    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = Some(genres);
        self
    }

    pub fn with_trending_day(mut self, movies: Vec<MovieSummary>) -> Self {
        self.trending_day = Some(movies);
        self
    }

    /// Toggle failure for an operation after construction
    pub fn set_failing(&self, op: Op, failing: bool) {
        let mut set = self.failing.lock();
        if failing {
            set.insert(op);
        } else {
            set.remove(&op);
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, op: Op) -> usize {
        self.calls.lock().iter().filter(|c| c.op == op).count()
    }

    async fn script<T>(
        &self,
        op: Op,
        arg: impl Into<String>,
        value: impl FnOnce() -> T,
    ) -> Result<T> {
        self.calls.lock().push(Call {
            op,
            arg: arg.into(),
        });

        if let Some(delay) = self.delays.get(&op) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.lock().contains(&op) {
            return Err(CatalogError::Api {
                status: 503,
                message: format!("{op:?} unavailable"),
            });
        }

        Ok(value())
    }
}

/// Movies the scripted remote returns, distinct from the sample catalog
pub fn remote_movies(prefix: &str, first_id: i64) -> Vec<MovieSummary> {
    (0..2)
        .map(|i| MovieSummary::new(first_id + i, format!("{prefix} {}", i + 1)).with_rating(7.5))
        .collect()
}

#[async_trait]
impl MovieSource for ScriptedSource {
    fn id(&self) -> &'static str {
        "scripted"
    }

    async fn popular(&self, page: u32) -> Result<Vec<MovieSummary>> {
        self.script(Op::Popular, page.to_string(), || remote_movies("Popular", 100))
            .await
    }

    async fn trending(&self, window: TimeWindow) -> Result<Vec<MovieSummary>> {
        self.script(Op::Trending, window.as_str(), || match window {
            TimeWindow::Day => self
                .trending_day
                .clone()
                .unwrap_or_else(|| remote_movies("Today", 200)),
            TimeWindow::Week => remote_movies("Trending", 300),
        })
        .await
    }

    async fn released_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        _page: u32,
    ) -> Result<Vec<MovieSummary>> {
        self.script(Op::NewReleases, format!("{from}..{to}"), || {
            self.releases.clone()
        })
        .await
    }

    async fn by_genre(&self, genre_id: i64, _page: u32) -> Result<Vec<MovieSummary>> {
        self.script(Op::ByGenre, genre_id.to_string(), || {
            vec![
                MovieSummary::new(500 + genre_id, format!("Genre {genre_id}"))
                    .with_genres(vec![genre_id]),
            ]
        })
        .await
    }

    async fn search(&self, query: &str, _page: u32) -> Result<Vec<MovieSummary>> {
        self.script(Op::Search, query, || {
            vec![MovieSummary::new(900, format!("Result for {query}"))]
        })
        .await
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        self.script(Op::Genres, "", || {
            self.genres
                .clone()
                .unwrap_or_else(|| vec![Genre::new(35, "Comedy"), Genre::new(27, "Horror")])
        })
        .await
    }

    async fn detail(&self, id: i64) -> Result<MovieDetail> {
        self.script(Op::Detail, id.to_string(), || {
            MovieDetail::from_summary(MovieSummary::new(id, format!("Remote {id}")))
        })
        .await
    }
}
