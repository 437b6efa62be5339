//! Reporting Errors

use fuel_record::SelectionError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or running a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No fill-up input given")]
    MissingInput,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Failed to install log subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Year out of range: {0}")]
    InvalidYear(i32),

    #[error("Invalid selection: {0}")]
    Selection(#[from] SelectionError),
}
