//! Report Pipeline
//!
//! One query end to end: validate the selection, normalize the raw batch,
//! select the window, then derive every output from it.

use crate::aggregate::{AggregateSummary, ImperialSummary};
use crate::consumption::ConsumptionPoint;
use crate::grouping::{GroupBy, GroupSummary};
use crate::per_fill::{FillMetrics, PricePoint};
use crate::rankings::Rankings;
use crate::units::UnitSystem;
use crate::window::{Selection, Window};
use fill_validator::{InvalidRecord, NormalizeOutcome, NormalizedFillUps, Normalizer, RawBatch};
use fuel_record::{RawFillUp, SelectionError, VehicleDirectory, VehicleId, VehicleSelector};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Everything a statistics view shows for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub selection: Selection,
    pub units: UnitSystem,
    /// Records left out of the batch, with reasons
    pub rejected: Vec<InvalidRecord>,
    pub summary: AggregateSummary,
    /// Present when the report was asked for in imperial units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imperial: Option<ImperialSummary>,
    pub consumption: Vec<ConsumptionPoint>,
    /// Pairs in the window dropped for a non-advancing odometer
    pub skipped_pairs: usize,
    pub price_series: Vec<PricePoint>,
    pub per_fill: Vec<FillMetrics>,
    pub by_brand_grade: Vec<GroupSummary>,
    pub by_month: Vec<GroupSummary>,
    pub rankings: Rankings,
    /// Display names of the vehicles present in the window
    pub vehicle_labels: BTreeMap<VehicleId, String>,
}

/// Query entry point
#[derive(Debug, Clone, Default)]
pub struct StatsEngine {
    normalizer: Normalizer,
    directory: VehicleDirectory,
    units: UnitSystem,
}

impl StatsEngine {
    pub fn new(directory: VehicleDirectory) -> Self {
        Self {
            directory,
            ..Default::default()
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    pub fn directory(&self) -> &VehicleDirectory {
        &self.directory
    }

    /// Normalize a raw batch, keeping only the selected vehicle's records
    /// when one vehicle is selected
    pub fn normalize(&self, raw: &[RawFillUp], vehicle: &VehicleSelector) -> NormalizeOutcome {
        self.normalizer_for(vehicle).normalize(raw)
    }

    /// Like [`StatsEngine::normalize`], for a batch read from a source
    pub fn normalize_batch(&self, batch: &RawBatch, vehicle: &VehicleSelector) -> NormalizeOutcome {
        self.normalizer_for(vehicle).normalize_batch(batch)
    }

    fn normalizer_for(&self, vehicle: &VehicleSelector) -> Normalizer {
        match vehicle.vehicle_id() {
            Some(id) => self.normalizer.clone().restrict_to(id.clone()),
            None => self.normalizer.clone(),
        }
    }

    /// Build a report from a raw batch.
    ///
    /// Fails only on an invalid selection. Bad records are reported in
    /// [`StatsReport::rejected`].
    pub fn report(
        &self,
        raw: &[RawFillUp],
        selection: &Selection,
    ) -> Result<StatsReport, SelectionError> {
        selection.range.validate()?;
        let outcome = self.normalize(raw, &selection.vehicle);
        self.check_vehicle(&selection.vehicle, &outcome.fill_ups)?;
        Ok(self.derive(&outcome.fill_ups, selection, outcome.rejected))
    }

    /// Build a report from a batch read from a source
    pub fn report_batch(
        &self,
        batch: &RawBatch,
        selection: &Selection,
    ) -> Result<StatsReport, SelectionError> {
        selection.range.validate()?;
        let outcome = self.normalize_batch(batch, &selection.vehicle);
        self.check_vehicle(&selection.vehicle, &outcome.fill_ups)?;
        Ok(self.derive(&outcome.fill_ups, selection, outcome.rejected))
    }

    /// Build a report from an already normalized history
    pub fn report_normalized(
        &self,
        normalized: &NormalizedFillUps,
        selection: &Selection,
    ) -> Result<StatsReport, SelectionError> {
        selection.range.validate()?;
        self.check_vehicle(&selection.vehicle, normalized)?;
        Ok(self.derive(normalized, selection, Vec::new()))
    }

    /// Known vehicles come from the directory. Without a directory, the
    /// vehicles present in the data are the known ones.
    fn check_vehicle(
        &self,
        vehicle: &VehicleSelector,
        normalized: &NormalizedFillUps,
    ) -> Result<(), SelectionError> {
        if !self.directory.is_empty() {
            return self.directory.check(vehicle);
        }
        match vehicle.vehicle_id() {
            Some(id) if normalized.history(id).is_none() => {
                Err(SelectionError::UnknownVehicle(id.clone()))
            }
            _ => Ok(()),
        }
    }

    fn derive(
        &self,
        normalized: &NormalizedFillUps,
        selection: &Selection,
        rejected: Vec<InvalidRecord>,
    ) -> StatsReport {
        let window = Window::select(normalized, selection);
        let consumption: Vec<ConsumptionPoint> = window.consumption().collect();
        debug!(
            "Window {} holds {} fill-ups and {} consumption points",
            selection.range,
            window.fill_ups().len(),
            consumption.len()
        );

        let summary = AggregateSummary::compute(
            window.fill_ups().iter().copied(),
            &consumption,
            Some(window.range()),
        );
        let vehicle_labels = window
            .fill_ups()
            .iter()
            .map(|fill| (fill.vehicle_id.clone(), self.directory.label(&fill.vehicle_id)))
            .collect();

        let report = StatsReport {
            selection: selection.clone(),
            units: self.units,
            imperial: self.units.is_imperial().then(|| summary.to_imperial()),
            skipped_pairs: window.skipped_pairs(),
            price_series: window.price_series(),
            per_fill: window.per_fill(),
            by_brand_grade: window.group_by(GroupBy::BrandGrade),
            by_month: window.group_by(GroupBy::Month),
            rankings: Rankings::compute(&consumption),
            summary,
            consumption,
            rejected,
            vehicle_labels,
        };

        info!(
            "Report for {} over {}: {} fill-ups, {} rejected, {} skipped pairs",
            selection.vehicle,
            selection.range,
            report.summary.fill_up_count,
            report.rejected.len(),
            report.skipped_pairs
        );
        report
    }
}
