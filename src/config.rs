//! Application configuration
//!
//! Values are layered, later layers winning:
//! 1. built-in defaults
//! 2. `movie-studio.toml` in the working directory (or `$MOVIE_STUDIO_CONFIG`)
//! 3. `MOVIE_STUDIO__<SECTION>__<KEY>` environment variables
//! 4. the `TMDB_API_KEY`, `TMDB_API_TOKEN`, `TMDB_API_BASE_URL`,
//!    `TMDB_IMAGE_BASE_URL`, `PAYPAL_ID` and `PAYPAL_MODE` overrides

use crate::catalog::{OnFailure, TmdbCredentials};
use crate::payments::PaymentMode;
use crate::state::ResolutionPolicy;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "movie-studio.toml";
const CONFIG_PATH_VAR: &str = "MOVIE_STUDIO_CONFIG";
const ENV_PREFIX: &str = "MOVIE_STUDIO";

/// Configuration result type
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub payments: PaymentsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// v3 API key
    pub api_key: Option<String>,
    /// v4 read access token, preferred over `api_key`
    pub access_token: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    /// Response language (e.g. "en-US")
    pub language: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/".to_string(),
            language: None,
            timeout_secs: 30,
        }
    }
}

impl TmdbConfig {
    /// Credentials to use, if any are configured
    pub fn credentials(&self) -> Option<TmdbCredentials> {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

        non_empty(&self.access_token)
            .map(TmdbCredentials::AccessToken)
            .or_else(|| non_empty(&self.api_key).map(TmdbCredentials::ApiKey))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// What happens when the remote API fails
    pub on_failure: OnFailure,
    /// Which in-flight result a region keeps when requests overlap
    pub resolution: ResolutionPolicy,
    /// Never call the remote API, always serve sample data
    pub use_sample_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a typed query is searched
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    pub mode: PaymentMode,
    /// Provider client id; only a masked prefix is ever logged
    pub client_id: Option<String>,
    /// Simulated provider round-trip
    pub latency_ms: u64,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            mode: PaymentMode::default(),
            client_id: None,
            latency_ms: 2_000,
        }
    }
}

impl PaymentsConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `MOVIE_STUDIO_LOG` overrides
    pub filter: String,
    /// Directory for daily log files; "default" uses the platform data dir
    pub directory: Option<PathBuf>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "movie_studio=info,warn".to_string(),
            directory: None,
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        let file = vars
            .get(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::load_with(Some(&file), &vars)
    }

    /// Load configuration from an optional file and an explicit variable set
    pub fn load_with(file: Option<&Path>, vars: &HashMap<String, String>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            )
            .set_override_option("tmdb.api_key", vars.get("TMDB_API_KEY").cloned())?
            .set_override_option("tmdb.access_token", vars.get("TMDB_API_TOKEN").cloned())?
            .set_override_option("tmdb.base_url", vars.get("TMDB_API_BASE_URL").cloned())?
            .set_override_option(
                "tmdb.image_base_url",
                vars.get("TMDB_IMAGE_BASE_URL").cloned(),
            )?
            .set_override_option("payments.client_id", vars.get("PAYPAL_ID").cloned())?
            .set_override_option("payments.mode", vars.get("PAYPAL_MODE").cloned())?;

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tmdb.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("tmdb.base_url must not be empty".into()));
        }
        if self.tmdb.timeout_secs == 0 {
            return Err(ConfigError::Invalid("tmdb.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_with(None, &HashMap::new()).unwrap();

        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.timeout_secs, 30);
        assert_eq!(config.search.debounce(), Duration::from_millis(500));
        assert_eq!(config.catalog.on_failure, OnFailure::Fallback);
        assert_eq!(config.catalog.resolution, ResolutionPolicy::LatestIssued);
        assert!(!config.catalog.use_sample_data);
        assert!(config.tmdb.credentials().is_none());
    }

    #[test]
    fn test_file_then_env_layering() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[tmdb]
api_key = "from-file"
language = "en-US"

[catalog]
on_failure = "propagate"
resolution = "last_arrival"

[search]
debounce_ms = 250
"#
        )
        .unwrap();

        let env = vars(&[("MOVIE_STUDIO__SEARCH__DEBOUNCE_MS", "750")]);
        let config = AppConfig::load_with(Some(file.path()), &env).unwrap();

        assert_eq!(config.tmdb.language.as_deref(), Some("en-US"));
        assert_eq!(config.catalog.on_failure, OnFailure::Propagate);
        assert_eq!(config.catalog.resolution, ResolutionPolicy::LastArrival);
        assert_eq!(config.search.debounce_ms, 750);
        assert_eq!(
            config.tmdb.credentials(),
            Some(TmdbCredentials::ApiKey("from-file".to_string()))
        );
    }

    #[test]
    fn test_legacy_tmdb_variables_override() {
        let env = vars(&[
            ("MOVIE_STUDIO__TMDB__API_KEY", "prefixed"),
            ("TMDB_API_KEY", "legacy"),
            ("TMDB_API_BASE_URL", "http://localhost:9000/3"),
        ]);
        let config = AppConfig::load_with(None, &env).unwrap();

        assert_eq!(config.tmdb.api_key.as_deref(), Some("legacy"));
        assert_eq!(config.tmdb.base_url, "http://localhost:9000/3");
    }

    #[test]
    fn test_access_token_preferred_over_api_key() {
        let env = vars(&[("TMDB_API_KEY", "key"), ("TMDB_API_TOKEN", "token")]);
        let config = AppConfig::load_with(None, &env).unwrap();

        assert_eq!(
            config.tmdb.credentials(),
            Some(TmdbCredentials::AccessToken("token".to_string()))
        );
    }

    #[test]
    fn test_blank_credentials_are_ignored() {
        let env = vars(&[("TMDB_API_KEY", "  ")]);
        let config = AppConfig::load_with(None, &env).unwrap();
        assert!(config.tmdb.credentials().is_none());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config =
            AppConfig::load_with(Some(Path::new("/nonexistent/movie-studio.toml")), &HashMap::new())
                .unwrap();
        assert_eq!(config.search.debounce_ms, 500);
    }

    #[test]
    fn test_payment_settings() {
        let defaults = AppConfig::load_with(None, &HashMap::new()).unwrap();
        assert_eq!(defaults.payments.mode, PaymentMode::Sandbox);
        assert_eq!(defaults.payments.latency(), Duration::from_secs(2));
        assert!(defaults.payments.client_id.is_none());

        let env = vars(&[
            ("PAYPAL_ID", "AS0glW8Jdc0S2BHQ"),
            ("PAYPAL_MODE", "LIVE"),
            ("MOVIE_STUDIO__PAYMENTS__LATENCY_MS", "0"),
        ]);
        let config = AppConfig::load_with(None, &env).unwrap();
        assert_eq!(config.payments.mode, PaymentMode::Live);
        assert_eq!(config.payments.client_id.as_deref(), Some("AS0glW8Jdc0S2BHQ"));
        assert_eq!(config.payments.latency(), Duration::ZERO);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let env = vars(&[("MOVIE_STUDIO__TMDB__TIMEOUT_SECS", "0")]);
        let result = AppConfig::load_with(None, &env);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
