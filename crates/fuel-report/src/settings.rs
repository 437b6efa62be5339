//! Report Configuration
//!
//! Layered lowest to highest: built-in defaults, an optional TOML file,
//! `FUEL_REPORT_*` environment variables. Command-line flags are applied on
//! top by the binary.

use crate::error::ReportError;
use fill_validator::ValidationConfig;
use fuel_stats::UnitSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "fuel-report";

/// Prefix of environment overrides, e.g. `FUEL_REPORT_UNITS=imperial`
pub const ENV_PREFIX: &str = "FUEL_REPORT";

/// Report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// JSON array of raw fill-ups
    pub fill_ups: Option<PathBuf>,
    /// JSON array of `{id, displayName}`
    pub vehicles: Option<PathBuf>,
    pub units: UnitSystem,
    /// Window length when no start date is given
    pub default_window_days: u32,
    /// Pretty-print the JSON report
    pub pretty: bool,
    pub log_level: String,
    pub validation: ValidationConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fill_ups: None,
            vehicles: None,
            units: UnitSystem::Metric,
            default_window_days: 30,
            pretty: false,
            log_level: "info".to_string(),
            validation: ValidationConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ReportError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
