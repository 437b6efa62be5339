//! Shape Validator for Fill-up Records

use crate::error::RecordError;
use chrono::NaiveDate;
use fuel_record::{FillUp, FillUpId, RawFillUp, RawValue, VehicleId};
use serde::{Deserialize, Serialize};

/// Validation configuration.
///
/// Only shape sanity lives here. The bounds catch unit slips (milliliters
/// typed as liters, odometer typed in meters), not business rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Largest plausible volume for one fill
    pub max_liters: f64,
    /// Largest plausible odometer reading
    pub max_odometer: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_liters: 2_000.0,
            max_odometer: 10_000_000,
        }
    }
}

/// Validator turning raw records into typed fill-ups
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate one raw record.
    ///
    /// Required fields are checked in a fixed order (id, vehicleId, date,
    /// odometerReading, liters, totalAmount) and the first failure wins.
    pub fn validate(&self, raw: &RawFillUp) -> Result<FillUp, RecordError> {
        let id = required_text("id", raw.id.as_ref())?;
        let vehicle_id = required_text("vehicleId", raw.vehicle_id.as_ref())?;
        let date = self.validate_date(raw.date.as_ref())?;
        let odometer_reading = self.validate_odometer(raw.odometer_reading.as_ref())?;
        let liters = self.validate_liters(raw.liters.as_ref())?;
        let total_amount = self.validate_total_amount(raw.total_amount.as_ref())?;

        Ok(FillUp {
            id: FillUpId::new(id),
            vehicle_id: VehicleId::new(vehicle_id),
            date,
            odometer_reading,
            liters,
            total_amount,
            fuel_brand: optional_text("fuelBrand", raw.fuel_brand.as_ref())?,
            fuel_grade: optional_text("fuelGrade", raw.fuel_grade.as_ref())?,
            station_name: optional_text("stationName", raw.station_name.as_ref())?,
            notes: optional_text("notes", raw.notes.as_ref())?,
        })
    }

    /// Read the vehicle id of a record without validating the rest
    pub fn vehicle_of(&self, raw: &RawFillUp) -> Option<VehicleId> {
        raw.vehicle_id
            .as_ref()
            .and_then(RawValue::as_text)
            .map(VehicleId::new)
    }

    /// Validate a `YYYY-MM-DD` calendar date
    pub fn validate_date(&self, value: Option<&RawValue>) -> Result<NaiveDate, RecordError> {
        let text = required_text("date", value)?;
        NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|_| RecordError::InvalidDate(text))
    }

    /// Validate a non-negative whole odometer reading
    pub fn validate_odometer(&self, value: Option<&RawValue>) -> Result<u64, RecordError> {
        let reading = required_number("odometerReading", value)?;
        self.validate_range("odometerReading", reading, (0.0, self.config.max_odometer as f64))?;
        if reading.fract() != 0.0 {
            return Err(RecordError::FractionalOdometer(reading));
        }
        Ok(reading as u64)
    }

    /// Validate a strictly positive volume
    pub fn validate_liters(&self, value: Option<&RawValue>) -> Result<f64, RecordError> {
        let liters = required_number("liters", value)?;
        if liters <= 0.0 {
            return Err(RecordError::NotPositive {
                field: "liters",
                value: liters,
            });
        }
        self.validate_range("liters", liters, (0.0, self.config.max_liters))?;
        Ok(liters)
    }

    /// Validate a non-negative amount of money
    pub fn validate_total_amount(&self, value: Option<&RawValue>) -> Result<f64, RecordError> {
        let amount = required_number("totalAmount", value)?;
        self.validate_range("totalAmount", amount, (0.0, f64::MAX))?;
        Ok(amount)
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), RecordError> {
        if value < range.0 || value > range.1 {
            Err(RecordError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }
}

fn required_text(field: &'static str, value: Option<&RawValue>) -> Result<String, RecordError> {
    let value = value.ok_or(RecordError::MissingField(field))?;
    if let RawValue::Other(other) = value {
        return Err(RecordError::Malformed {
            field,
            value: other.to_string(),
        });
    }
    value.as_text().ok_or(RecordError::MissingField(field))
}

fn required_number(field: &'static str, value: Option<&RawValue>) -> Result<f64, RecordError> {
    let value = value.ok_or(RecordError::MissingField(field))?;
    if let RawValue::Text(text) = value {
        if text.trim().is_empty() {
            return Err(RecordError::MissingField(field));
        }
    }
    match value.as_f64() {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(RecordError::NotNumeric {
            field,
            value: value.to_string(),
        }),
    }
}

/// Blank text reads as absent; numbers read as their text form
fn optional_text(
    field: &'static str,
    value: Option<&RawValue>,
) -> Result<Option<String>, RecordError> {
    match value {
        None => Ok(None),
        Some(RawValue::Other(other)) => Err(RecordError::Malformed {
            field,
            value: other.to_string(),
        }),
        Some(value) => Ok(value.as_text()),
    }
}
