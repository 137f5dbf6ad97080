//! Logging configuration using tracing

use crate::config::LoggingConfig;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Environment variable overriding the configured filter
pub const LOG_ENV: &str = "MOVIE_STUDIO_LOG";

const LOG_FILE_PREFIX: &str = "movie-studio.log";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to create log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging subsystem.
///
/// Logs go to stderr and, when `directory` is set, to a daily rolling file.
/// The level is controlled by `MOVIE_STUDIO_LOG`, falling back to the
/// configured filter.
///
/// ```bash
/// MOVIE_STUDIO_LOG=movie_studio=debug movie-studio
/// ```
///
/// Keep the returned guard alive for the life of the process or buffered
/// file output is lost.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let env_filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let mut layers: Vec<BoxedLayer> = vec![stderr_layer(config.json)];

    let guard = match log_directory(config) {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let (layer, guard) = file_layer(&dir, config.json);
            layers.push(layer);
            Some((dir, guard))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    tracing::info!("Movie Studio {} starting", env!("CARGO_PKG_VERSION"));

    Ok(guard.map(|(dir, guard)| {
        tracing::info!("Log directory: {}", dir.display());
        guard
    }))
}

/// Directory for log files, if file logging is enabled.
///
/// The literal value `default` selects `<data_local_dir>/movie-studio/logs`.
pub fn log_directory(config: &LoggingConfig) -> Option<PathBuf> {
    let dir = config.directory.as_ref()?;
    if dir.as_os_str() == "default" {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        return Some(base.join("movie-studio").join("logs"));
    }
    Some(dir.clone())
}

fn stderr_layer(json: bool) -> BoxedLayer {
    if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(fmt::time::ChronoLocal::new(TIME_FORMAT.to_string()))
            .boxed()
    }
}

fn file_layer(dir: &Path, json: bool) -> (BoxedLayer, WorkerGuard) {
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = if json {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(fmt::time::ChronoLocal::new(TIME_FORMAT.to_string()))
            .boxed()
    };

    (layer, guard)
}
