//! Per-fill Metrics

use crate::aggregate::ratio;
use chrono::NaiveDate;
use fuel_record::{FillUp, FillUpId, VehicleId};
use serde::Serialize;

/// Figures for a single fill-up, measured against the previous fill of the
/// same vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillMetrics {
    pub fill_up_id: FillUpId,
    pub vehicle_id: VehicleId,
    pub date: NaiveDate,
    pub odometer_reading: u64,
    pub liters: f64,
    pub total_amount: f64,
    pub unit_price: Option<f64>,
    /// Signed odometer delta; `None` for a vehicle's first fill or a
    /// reading beyond `i64`
    pub distance_since_last: Option<i64>,
    /// Money per distance unit; only when the odometer advanced
    pub cost_per_distance: Option<f64>,
    /// Liters per 100 distance units; only when the odometer advanced
    pub consumption: Option<f64>,
}

impl FillMetrics {
    pub fn measure(fill: &FillUp, previous: Option<&FillUp>) -> Self {
        let distance_since_last = previous.and_then(|prev| {
            let current = i64::try_from(fill.odometer_reading).ok()?;
            current.checked_sub(i64::try_from(prev.odometer_reading).ok()?)
        });
        let distance = distance_since_last.filter(|d| *d > 0).map(|d| d as f64);

        Self {
            fill_up_id: fill.id.clone(),
            vehicle_id: fill.vehicle_id.clone(),
            date: fill.date,
            odometer_reading: fill.odometer_reading,
            liters: fill.liters,
            total_amount: fill.total_amount,
            unit_price: fill.unit_price(),
            distance_since_last,
            cost_per_distance: distance.and_then(|d| ratio(fill.total_amount, d)),
            consumption: distance.and_then(|d| ratio(fill.liters, d)).map(|c| c * 100.0),
        }
    }
}

/// One sample of the price-per-liter chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub vehicle_id: VehicleId,
    pub unit_price: f64,
}

impl PricePoint {
    pub fn of(fill: &FillUp) -> Option<Self> {
        Some(Self {
            date: fill.date,
            vehicle_id: fill.vehicle_id.clone(),
            unit_price: fill.unit_price()?,
        })
    }
}
