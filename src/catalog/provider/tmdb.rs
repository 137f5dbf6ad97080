use super::api_types::{GenreListResponse, MovieDetails, MovieResult, PagedResponse};
use crate::catalog::{
    Result,
    provider::{HttpClient, ImageSize},
    source::MovieSource,
    types::{Genre, MovieDetail, MovieSummary, TimeWindow},
};
use crate::config::TmdbConfig;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::debug;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/";

/// How requests authenticate against TMDB
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TmdbCredentials {
    /// v3 `api_key` query parameter
    ApiKey(String),
    /// v4 read access token sent as a bearer header
    AccessToken(String),
}

/// Client for the TMDB v3 movie endpoints
pub struct TmdbClient {
    client: HttpClient,
    api_key: Option<String>,
    language: Option<String>,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(credentials: TmdbCredentials) -> Result<Self> {
        Self::with_base_url(TMDB_BASE_URL, credentials, Duration::from_secs(30))
    }

    /// Client against a custom base URL (proxies, local stubs)
    pub fn with_base_url(
        base_url: impl Into<String>,
        credentials: TmdbCredentials,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let (client, api_key) = match credentials {
            TmdbCredentials::ApiKey(key) => (HttpClient::new(base_url, timeout)?, Some(key)),
            TmdbCredentials::AccessToken(token) => {
                (HttpClient::with_bearer(base_url, timeout, &token)?, None)
            }
        };

        Ok(Self {
            client,
            api_key,
            language: None,
            image_base_url: TMDB_IMAGE_BASE.to_string(),
        })
    }

    pub fn from_config(config: &TmdbConfig, credentials: TmdbCredentials) -> Result<Self> {
        let mut client = Self::with_base_url(
            config.base_url.clone(),
            credentials,
            Duration::from_secs(config.timeout_secs),
        )?;
        client.language = config.language.clone();
        client.image_base_url = config.image_base_url.clone();
        Ok(client)
    }

    /// Builder pattern: set response language (e.g. "en-US")
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Full image URL for a path returned by the API
    pub fn image_url(&self, path: Option<&str>, size: ImageSize) -> Option<String> {
        size.url(&self.image_base_url, path)
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T> {
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(extra_params.len() + 2);
        if let Some(ref key) = self.api_key {
            params.push(("api_key", key.as_str()));
        }
        if let Some(ref language) = self.language {
            params.push(("language", language.as_str()));
        }
        params.extend_from_slice(extra_params);

        self.client.get_with_params(endpoint, &params).await
    }

    async fn movie_list(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<MovieSummary>> {
        let response: PagedResponse<MovieResult> = self.request(endpoint, params).await?;

        debug!(
            "{} returned page {}/{} ({} total)",
            endpoint, response.page, response.total_pages, response.total_results
        );

        Ok(response
            .results
            .into_iter()
            .map(MovieSummary::from)
            .collect())
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    fn id(&self) -> &'static str {
        "tmdb"
    }

    async fn popular(&self, page: u32) -> Result<Vec<MovieSummary>> {
        let page = page.to_string();
        self.movie_list("/movie/popular", &[("page", page.as_str())]).await
    }

    async fn trending(&self, window: TimeWindow) -> Result<Vec<MovieSummary>> {
        let endpoint = format!("/trending/movie/{window}");
        self.movie_list(&endpoint, &[]).await
    }

    async fn released_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        page: u32,
    ) -> Result<Vec<MovieSummary>> {
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();
        let page = page.to_string();

        self.movie_list(
            "/discover/movie",
            &[
                ("sort_by", "release_date.desc"),
                ("primary_release_date.gte", from.as_str()),
                ("primary_release_date.lte", to.as_str()),
                ("page", page.as_str()),
            ],
        )
        .await
    }

    async fn by_genre(&self, genre_id: i64, page: u32) -> Result<Vec<MovieSummary>> {
        let genre = genre_id.to_string();
        let page = page.to_string();
        self.movie_list(
            "/discover/movie",
            &[("with_genres", genre.as_str()), ("page", page.as_str())],
        )
        .await
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieSummary>> {
        let page = page.to_string();
        self.movie_list("/search/movie", &[("query", query), ("page", page.as_str())])
            .await
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        let response: GenreListResponse = self.request("/genre/movie/list", &[]).await?;
        Ok(response.genres.into_iter().map(Genre::from).collect())
    }

    async fn detail(&self, id: i64) -> Result<MovieDetail> {
        let endpoint = format!("/movie/{id}");
        let movie: MovieDetails = self
            .request(&endpoint, &[("append_to_response", "videos,credits")])
            .await?;

        Ok(movie.into())
    }
}
