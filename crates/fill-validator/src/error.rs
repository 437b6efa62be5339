//! Validation Error Types

use fuel_record::FillUpId;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a single fill-up record failed shape validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// Required field absent or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Field that must be numeric holds something else
    #[error("{field} is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },

    /// Text field holding a value of the wrong kind
    #[error("{field} has an unexpected value: {value}")]
    Malformed { field: &'static str, value: String },

    /// Value that must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Odometer readings are whole distance units
    #[error("odometerReading must be a whole number, got {0}")]
    FractionalOdometer(f64),

    /// Date not in `YYYY-MM-DD` form
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Batch element that is not a fill-up object at all
    #[error("Unreadable record: {0}")]
    Unreadable(String),

    /// Id already used by an earlier record in the batch
    #[error("Duplicate fill-up id: {0}")]
    DuplicateId(FillUpId),
}

/// A record excluded from a batch, with enough context to show the user
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("record #{position} ({}) rejected: {error}", .id.as_deref().unwrap_or("no id"))]
pub struct InvalidRecord {
    /// Zero-based position in the input batch
    pub position: usize,
    /// Record id, when one could be read
    pub id: Option<String>,
    #[serde(rename = "reason", serialize_with = "serialize_display")]
    pub error: RecordError,
}

fn serialize_display<S: Serializer>(error: &RecordError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
