//! Fuel Statistics Report
//!
//! Read-only reporting surface over the statistics engine: loads fill-ups
//! and the vehicle directory, runs one query and hands back a serializable
//! report.

mod error;
mod settings;
mod source;

pub use error::ReportError;
pub use settings::{ReportConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use source::{load_directory, FillUpSource, JsonFileSource};

use chrono::NaiveDate;
use fill_validator::{Normalizer, Validator};
use fuel_record::{DateRange, VehicleDirectory, VehicleSelector};
use fuel_stats::{Selection, StatsEngine, StatsReport};
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout carries only the report. Fails when a
/// subscriber is already installed.
pub fn init_logging(level: &str) -> Result<(), ReportError> {
    let level =
        Level::from_str(level).map_err(|_| ReportError::InvalidLogLevel(level.to_string()))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Query parameters before defaults are applied
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub vehicle: VehicleSelector,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Window length ending at `end`, used when `start` is absent
    pub days: Option<u32>,
    /// January 1st of `end`'s year through `end`
    pub year_to_date: bool,
    /// A whole calendar year; takes precedence over every other range field
    pub year: Option<i32>,
    pub brand: Option<String>,
    pub grade: Option<String>,
    pub station: Option<String>,
}

impl Query {
    /// Resolve into a selection. The end defaults to `today`, the start to
    /// `days` (or `default_days`) before the end.
    pub fn selection(&self, today: NaiveDate, default_days: u32) -> Result<Selection, ReportError> {
        let end = self.end.unwrap_or(today);
        let range = match (self.year, self.start) {
            (Some(year), _) => DateRange::year(year).ok_or(ReportError::InvalidYear(year))?,
            (None, _) if self.year_to_date => DateRange::year_to_date(end),
            (None, Some(start)) => DateRange::new(start, end),
            (None, None) => DateRange::last_days(end, self.days.unwrap_or(default_days)),
        };

        let mut selection = Selection::new(self.vehicle.clone(), range);
        selection.brand = self.brand.clone();
        selection.grade = self.grade.clone();
        selection.station = self.station.clone();
        Ok(selection)
    }
}

/// Run one report with the given configuration
pub fn run(
    config: &ReportConfig,
    source: &dyn FillUpSource,
    query: &Query,
    today: NaiveDate,
) -> Result<StatsReport, ReportError> {
    let directory = match &config.vehicles {
        Some(path) => load_directory(path)?,
        None => VehicleDirectory::new(),
    };
    let selection = query.selection(today, config.default_window_days)?;
    let batch = source.load()?;
    info!(
        "Running report for {} over {} ({} raw records)",
        selection.vehicle,
        selection.range,
        batch.len()
    );

    let engine = StatsEngine::new(directory)
        .with_normalizer(Normalizer::new(Validator::new(config.validation.clone())))
        .with_units(config.units);
    Ok(engine.report_batch(&batch, &selection)?)
}

/// Serialize a report as JSON
pub fn render(report: &StatsReport, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_reports_failures() {
        assert!(matches!(
            init_logging("chatty"),
            Err(ReportError::InvalidLogLevel(level)) if level == "chatty"
        ));
        assert!(init_logging("debug").is_ok());
        // Only one global subscriber can be installed per process.
        assert!(matches!(init_logging("info"), Err(ReportError::Logging(_))));
    }
}
