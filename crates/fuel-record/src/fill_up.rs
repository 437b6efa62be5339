//! Fill-up Records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque vehicle identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque fill-up identifier, unique within a batch
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FillUpId(String);

impl FillUpId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FillUpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FillUpId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A validated fuel fill-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillUp {
    pub id: FillUpId,
    pub vehicle_id: VehicleId,
    /// Calendar date of the fill (no time component)
    pub date: NaiveDate,
    /// Cumulative distance shown by the odometer at fill time
    pub odometer_reading: u64,
    /// Volume added (always > 0)
    pub liters: f64,
    /// Money spent (always >= 0)
    pub total_amount: f64,
    pub fuel_brand: Option<String>,
    pub fuel_grade: Option<String>,
    pub station_name: Option<String>,
    pub notes: Option<String>,
}

impl FillUp {
    /// Create a fill-up with no brand, grade, station or notes
    pub fn new(
        id: impl Into<String>,
        vehicle_id: impl Into<String>,
        date: NaiveDate,
        odometer_reading: u64,
        liters: f64,
        total_amount: f64,
    ) -> Self {
        Self {
            id: FillUpId::new(id),
            vehicle_id: VehicleId::new(vehicle_id),
            date,
            odometer_reading,
            liters,
            total_amount,
            fuel_brand: None,
            fuel_grade: None,
            station_name: None,
            notes: None,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.fuel_brand = Some(brand.into());
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.fuel_grade = Some(grade.into());
        self
    }

    pub fn with_station(mut self, station: impl Into<String>) -> Self {
        self.station_name = Some(station.into());
        self
    }

    /// Price paid per liter at this fill
    pub fn unit_price(&self) -> Option<f64> {
        (self.liters > 0.0).then(|| self.total_amount / self.liters)
    }
}

/// Untyped field value as it arrives from the fill-up source.
///
/// Form input routinely delivers numbers as strings, so numeric fields accept
/// both. Anything else (booleans, arrays, objects) is kept so validation can
/// report it instead of failing the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// Numeric reading of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => n.as_f64(),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
            RawValue::Other(_) => None,
        }
    }

    /// Text reading of the value, used for identifiers and dates
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            RawValue::Other(_) => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => write!(f, "{:?}", s),
            RawValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(RawValue::Number)
            .unwrap_or_else(|| RawValue::Text(value.to_string()))
    }
}

impl From<u64> for RawValue {
    fn from(value: u64) -> Self {
        RawValue::Number(value.into())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// A fill-up exactly as supplied by the fill-up source, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFillUp {
    pub id: Option<RawValue>,
    pub vehicle_id: Option<RawValue>,
    pub date: Option<RawValue>,
    #[serde(alias = "odometer")]
    pub odometer_reading: Option<RawValue>,
    pub liters: Option<RawValue>,
    pub total_amount: Option<RawValue>,
    pub fuel_brand: Option<RawValue>,
    pub fuel_grade: Option<RawValue>,
    pub station_name: Option<RawValue>,
    pub notes: Option<RawValue>,
}

impl From<FillUp> for RawFillUp {
    fn from(fill: FillUp) -> Self {
        Self {
            id: Some(RawValue::Text(fill.id.0)),
            vehicle_id: Some(RawValue::Text(fill.vehicle_id.0)),
            date: Some(RawValue::Text(fill.date.format("%Y-%m-%d").to_string())),
            odometer_reading: Some(fill.odometer_reading.into()),
            liters: Some(fill.liters.into()),
            total_amount: Some(fill.total_amount.into()),
            fuel_brand: fill.fuel_brand.map(RawValue::Text),
            fuel_grade: fill.fuel_grade.map(RawValue::Text),
            station_name: fill.station_name.map(RawValue::Text),
            notes: fill.notes.map(RawValue::Text),
        }
    }
}
