//! Selection Error Types

use crate::VehicleId;
use chrono::NaiveDate;
use thiserror::Error;

/// Caller errors in query selection parameters.
///
/// These abort a query. They are distinct from missing data, which the
/// statistics layer reports as `None` values and empty series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Date range whose start lies after its end
    #[error("Invalid date range: start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    /// Vehicle selector naming a vehicle the directory does not know
    #[error("Unknown vehicle: {0}")]
    UnknownVehicle(VehicleId),
}
