//! Aggregate KPIs
//!
//! Every ratio is `None` when its denominator is zero or its inputs are
//! missing. `None` means "not enough data", never an error, and is never
//! replaced by a zero.

use crate::consumption::ConsumptionPoint;
use crate::units;
use fuel_record::{DateRange, FillUp};
use serde::Serialize;

/// Scalar KPIs over a set of fill-ups and their consumption points
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    pub fill_up_count: usize,
    /// Sum of amounts; `None` for an empty set
    pub total_spend: Option<f64>,
    /// Sum of liters; `None` for an empty set
    pub total_liters: Option<f64>,
    /// Sum of point distances; `None` without points
    pub total_distance: Option<u64>,
    pub avg_cost_per_liter: Option<f64>,
    /// Liters per 100 distance units over the points
    pub avg_consumption: Option<f64>,
    pub avg_cost_per_distance: Option<f64>,
    /// Distance per day of the requested range
    pub avg_distance_per_day: Option<f64>,
}

impl AggregateSummary {
    /// Compute KPIs.
    ///
    /// `points` should be the consumption points closing on the given
    /// fill-ups. `range` is the requested window; without one, distance per
    /// day is not computed.
    pub fn compute<'f>(
        fill_ups: impl IntoIterator<Item = &'f FillUp>,
        points: &[ConsumptionPoint],
        range: Option<&DateRange>,
    ) -> Self {
        let mut fill_up_count = 0usize;
        let mut spend = 0.0;
        let mut liters = 0.0;
        for fill in fill_ups {
            fill_up_count += 1;
            spend += fill.total_amount;
            liters += fill.liters;
        }

        let distance: u64 = points.iter().map(|p| p.distance).sum();
        let liters_used: f64 = points.iter().map(|p| p.liters_used).sum();

        let total_spend = (fill_up_count > 0).then_some(spend);
        let total_liters = (fill_up_count > 0).then_some(liters);
        let total_distance = (!points.is_empty()).then_some(distance);

        let avg_distance_per_day = match (total_distance, range.and_then(DateRange::days)) {
            (Some(distance), Some(days)) => ratio(distance as f64, days as f64),
            _ => None,
        };

        Self {
            fill_up_count,
            total_spend,
            total_liters,
            total_distance,
            avg_cost_per_liter: ratio(spend, liters),
            avg_consumption: ratio(liters_used, distance as f64).map(|c| c * 100.0),
            avg_cost_per_distance: total_spend
                .zip(total_distance)
                .and_then(|(spend, distance)| ratio(spend, distance as f64)),
            avg_distance_per_day,
        }
    }

    /// Whether there was nothing to aggregate
    pub fn is_empty(&self) -> bool {
        self.fill_up_count == 0
    }

    /// Average consumption as US miles per gallon
    pub fn avg_mpg(&self) -> Option<f64> {
        self.avg_consumption.and_then(units::l_per_100km_to_mpg)
    }

    /// The same figures in miles and US gallons
    pub fn to_imperial(&self) -> ImperialSummary {
        let total_miles = self.total_distance.map(|d| units::km_to_miles(d as f64));
        let total_gallons = self.total_liters.map(units::liters_to_gallons);
        ImperialSummary {
            total_miles,
            total_gallons,
            avg_mpg: self.avg_mpg(),
            avg_cost_per_gallon: self.total_spend.zip(total_gallons).and_then(|(s, g)| ratio(s, g)),
            avg_cost_per_mile: self.total_spend.zip(total_miles).and_then(|(s, m)| ratio(s, m)),
            avg_miles_per_day: self.avg_distance_per_day.map(units::km_to_miles),
        }
    }
}

/// Imperial view of an [`AggregateSummary`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImperialSummary {
    pub total_miles: Option<f64>,
    pub total_gallons: Option<f64>,
    pub avg_mpg: Option<f64>,
    pub avg_cost_per_gallon: Option<f64>,
    pub avg_cost_per_mile: Option<f64>,
    pub avg_miles_per_day: Option<f64>,
}

/// `numerator / denominator`, or `None` where that would not be a finite number
pub(crate) fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}
