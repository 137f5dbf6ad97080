mod data_source;
mod provider;
mod sample;
mod source;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use data_source::{CatalogDataSource, Clock, NewReleaseWindow, OnFailure, Page};
pub use provider::{HttpClient, ImageSize, TmdbClient, TmdbCredentials};
pub use sample::{sample_detail, sample_genres, sample_movies};
pub use source::{MovieSource, UnconfiguredSource};
pub use types::{
    CastMember, Category, Company, CrewMember, Genre, MovieDetail, MovieSummary, TimeWindow,
    Video,
};

use crate::config::AppConfig;
use std::sync::Arc;

/// Catalog result type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog error types
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Build the data source described by the configuration.
///
/// Without credentials, or with `use_sample_data` set, every call goes to
/// [`UnconfiguredSource`], so the fallback policy decides what callers see.
pub fn create_data_source(config: &AppConfig) -> Result<CatalogDataSource> {
    let source: Arc<dyn MovieSource> = match config.tmdb.credentials() {
        Some(credentials) if !config.catalog.use_sample_data => {
            Arc::new(TmdbClient::from_config(&config.tmdb, credentials)?)
        }
        _ => {
            tracing::info!("TMDB is not configured, serving sample catalog data");
            Arc::new(UnconfiguredSource)
        }
    };

    Ok(CatalogDataSource::new(source).with_policy(config.catalog.on_failure))
}
