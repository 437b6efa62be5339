//! Window/Filter Selection

use crate::aggregate::AggregateSummary;
use crate::consumption::{ConsumptionPoint, MergedConsumption};
use crate::grouping::{group, GroupBy, GroupSummary};
use crate::per_fill::{FillMetrics, PricePoint};
use crate::rankings::Rankings;
use fill_validator::NormalizedFillUps;
use fuel_record::{DateRange, FillUp, FillUpId, SelectionError, VehicleDirectory, VehicleSelector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a statistics query covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub vehicle: VehicleSelector,
    /// Inclusive date range
    pub range: DateRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
}

impl Selection {
    pub fn new(vehicle: VehicleSelector, range: DateRange) -> Self {
        Self {
            vehicle,
            range,
            brand: None,
            grade: None,
            station: None,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_station(mut self, station: impl Into<String>) -> Self {
        self.station = Some(station.into());
        self
    }

    /// Whether a fill-up is inside this selection
    pub fn matches(&self, fill: &FillUp) -> bool {
        self.vehicle.matches(&fill.vehicle_id)
            && self.range.contains(fill.date)
            && attribute_matches(self.brand.as_deref(), fill.fuel_brand.as_deref())
            && attribute_matches(self.grade.as_deref(), fill.fuel_grade.as_deref())
            && attribute_matches(self.station.as_deref(), fill.station_name.as_deref())
    }

    /// Reject inverted ranges and vehicles the directory does not list
    pub fn validate(&self, directory: &VehicleDirectory) -> Result<(), SelectionError> {
        self.range.validate()?;
        directory.check(&self.vehicle)
    }
}

fn attribute_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}

/// The slice of a normalized history a query looks at.
///
/// Fill-ups are filtered directly. Consumption is paired over the full
/// normalized history first and only then filtered by its closing fill-up,
/// so the first point of a window measures the distance from the fill just
/// before the window instead of starting from nothing.
///
/// A degenerate date range selects nothing.
#[derive(Debug, Clone)]
pub struct Window<'a> {
    normalized: &'a NormalizedFillUps,
    selection: Selection,
    /// Selected fill-ups ordered by date, vehicles in id order on ties
    fill_ups: Vec<&'a FillUp>,
    ids: HashSet<&'a FillUpId>,
    series: MergedConsumption<'a>,
}

impl<'a> Window<'a> {
    pub fn select(normalized: &'a NormalizedFillUps, selection: &Selection) -> Self {
        let histories: Vec<&'a [FillUp]> = normalized
            .histories()
            .filter(|(vehicle_id, _)| selection.vehicle.matches(vehicle_id))
            .map(|(_, history)| history)
            .collect();

        let mut fill_ups: Vec<&'a FillUp> = histories
            .iter()
            .copied()
            .flatten()
            .filter(|fill| selection.matches(fill))
            .collect();
        // Stable: keeps vehicle order and per-vehicle order on equal dates.
        fill_ups.sort_by_key(|fill| fill.date);

        let ids = fill_ups.iter().map(|&fill| &fill.id).collect();

        Self {
            normalized,
            selection: selection.clone(),
            fill_ups,
            ids,
            series: MergedConsumption::new(histories),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn range(&self) -> &DateRange {
        &self.selection.range
    }

    pub fn fill_ups(&self) -> &[&'a FillUp] {
        &self.fill_ups
    }

    pub fn is_empty(&self) -> bool {
        self.fill_ups.is_empty()
    }

    /// Consumption points closing inside the window, in date order.
    ///
    /// Lazy and restartable: each call walks the histories again.
    pub fn consumption(&self) -> impl Iterator<Item = ConsumptionPoint> + '_ {
        self.series
            .iter()
            .filter(move |point| self.ids.contains(&point.fill_up_id))
    }

    /// Adjacent pairs closing inside the window that were skipped because
    /// the odometer did not advance
    pub fn skipped_pairs(&self) -> usize {
        self.normalized
            .histories()
            .filter(|(vehicle_id, _)| self.selection.vehicle.matches(vehicle_id))
            .flat_map(|(_, history)| history.windows(2))
            .filter(|pair| {
                self.ids.contains(&pair[1].id)
                    && pair[1].odometer_reading <= pair[0].odometer_reading
            })
            .count()
    }

    /// Scalar KPIs over the window
    pub fn summary(&self) -> AggregateSummary {
        let points: Vec<ConsumptionPoint> = self.consumption().collect();
        AggregateSummary::compute(self.fill_ups.iter().copied(), &points, Some(self.range()))
    }

    /// Per-group KPIs
    pub fn group_by(&self, by: GroupBy) -> Vec<GroupSummary> {
        let points: Vec<ConsumptionPoint> = self.consumption().collect();
        group(&self.fill_ups, &points, by)
    }

    /// Per-fill metrics, each measured against the previous fill of the same
    /// vehicle in the full history
    pub fn per_fill(&self) -> Vec<FillMetrics> {
        let mut metrics: Vec<FillMetrics> = self
            .normalized
            .histories()
            .filter(|(vehicle_id, _)| self.selection.vehicle.matches(vehicle_id))
            .flat_map(move |(_, history)| {
                history.iter().enumerate().filter_map(move |(i, fill)| {
                    self.ids.contains(&fill.id).then(|| {
                        let previous = i.checked_sub(1).map(|p| &history[p]);
                        FillMetrics::measure(fill, previous)
                    })
                })
            })
            .collect();
        metrics.sort_by_key(|m| m.date);
        metrics
    }

    /// Price per liter over time
    pub fn price_series(&self) -> Vec<PricePoint> {
        self.fill_ups
            .iter()
            .filter_map(|fill| PricePoint::of(fill))
            .collect()
    }

    pub fn rankings(&self) -> Rankings {
        let points: Vec<ConsumptionPoint> = self.consumption().collect();
        Rankings::compute(&points)
    }
}
