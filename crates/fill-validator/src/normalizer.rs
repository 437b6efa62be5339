//! Per-vehicle Chronological Normalization

use crate::error::{InvalidRecord, RecordError};
use crate::validator::Validator;
use fuel_record::{FillUp, FillUpId, RawFillUp, RawValue, VehicleId};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Fill-up histories keyed by vehicle, each in canonical order.
///
/// Canonical order is ascending by date, then odometer reading, then id, so
/// two fills on the same day still pair up deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedFillUps {
    histories: BTreeMap<VehicleId, Vec<FillUp>>,
}

impl NormalizedFillUps {
    /// Group and order already-typed fill-ups.
    ///
    /// Upstream ordering is never trusted, so this sorts even if the source
    /// claims to deliver sorted data.
    pub fn from_fill_ups(fill_ups: impl IntoIterator<Item = FillUp>) -> Self {
        let mut histories: BTreeMap<VehicleId, Vec<FillUp>> = BTreeMap::new();
        for fill in fill_ups {
            histories.entry(fill.vehicle_id.clone()).or_default().push(fill);
        }
        for history in histories.values_mut() {
            history.sort_by(|a, b| {
                a.date
                    .cmp(&b.date)
                    .then(a.odometer_reading.cmp(&b.odometer_reading))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        Self { histories }
    }

    /// One vehicle's ordered history
    pub fn history(&self, vehicle_id: &VehicleId) -> Option<&[FillUp]> {
        self.histories.get(vehicle_id).map(Vec::as_slice)
    }

    /// Every vehicle's ordered history, vehicles in id order
    pub fn histories(&self) -> impl Iterator<Item = (&VehicleId, &[FillUp])> {
        self.histories.iter().map(|(id, h)| (id, h.as_slice()))
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &VehicleId> {
        self.histories.keys()
    }

    /// All fill-ups, vehicle by vehicle
    pub fn iter(&self) -> impl Iterator<Item = &FillUp> {
        self.histories.values().flatten()
    }

    /// Total number of fill-ups across vehicles
    pub fn len(&self) -> usize {
        self.histories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

/// Result of normalizing one batch: the usable histories plus every record
/// that had to be left out.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOutcome {
    pub fill_ups: NormalizedFillUps,
    pub rejected: Vec<InvalidRecord>,
}

/// A raw batch as read from a fill-up source.
///
/// Elements that could not be read as records at all are kept as rejections
/// at their original position, so positions in reports line up with the
/// source.
#[derive(Debug, Clone, Default)]
pub struct RawBatch {
    records: Vec<(usize, RawFillUp)>,
    unreadable: Vec<InvalidRecord>,
}

impl RawBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: usize, record: RawFillUp) {
        self.records.push((position, record));
    }

    /// Record an element that is not a readable fill-up
    pub fn push_unreadable(&mut self, position: usize, id: Option<String>, reason: impl Into<String>) {
        self.unreadable.push(InvalidRecord {
            position,
            id,
            error: RecordError::Unreadable(reason.into()),
        });
    }

    pub fn records(&self) -> impl Iterator<Item = &RawFillUp> {
        self.records.iter().map(|(_, record)| record)
    }

    pub fn unreadable(&self) -> &[InvalidRecord] {
        &self.unreadable
    }

    /// Number of elements in the source, readable or not
    pub fn len(&self) -> usize {
        self.records.len() + self.unreadable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<RawFillUp>> for RawBatch {
    fn from(records: Vec<RawFillUp>) -> Self {
        Self {
            records: records.into_iter().enumerate().collect(),
            unreadable: Vec::new(),
        }
    }
}

/// Normalizer for raw fill-up batches
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    validator: Validator,
    only: Option<VehicleId>,
}

impl Normalizer {
    pub fn new(validator: Validator) -> Self {
        Self {
            validator,
            only: None,
        }
    }

    /// Keep only one vehicle's records.
    ///
    /// Records that clearly belong to another vehicle are skipped without
    /// being reported. Records whose vehicle cannot be read are still
    /// reported, since they might have been this vehicle's.
    pub fn restrict_to(mut self, vehicle_id: VehicleId) -> Self {
        self.only = Some(vehicle_id);
        self
    }

    /// Validate, group and order a batch
    pub fn normalize(&self, raw: &[RawFillUp]) -> NormalizeOutcome {
        self.normalize_entries(raw.iter().enumerate(), Vec::new())
    }

    /// Validate, group and order a batch read from a source, keeping its
    /// unreadable elements among the rejections
    pub fn normalize_batch(&self, batch: &RawBatch) -> NormalizeOutcome {
        for invalid in &batch.unreadable {
            warn!("Skipping fill-up: {}", invalid);
        }
        self.normalize_entries(
            batch.records.iter().map(|(position, record)| (*position, record)),
            batch.unreadable.clone(),
        )
    }

    fn normalize_entries<'r>(
        &self,
        entries: impl IntoIterator<Item = (usize, &'r RawFillUp)>,
        mut rejected: Vec<InvalidRecord>,
    ) -> NormalizeOutcome {
        let mut valid = Vec::new();
        let mut seen: HashSet<FillUpId> = HashSet::new();

        for (position, record) in entries {
            if let (Some(only), Some(vehicle)) = (&self.only, self.validator.vehicle_of(record)) {
                if *only != vehicle {
                    continue;
                }
            }

            let checked = self.validator.validate(record).and_then(|fill| {
                if seen.insert(fill.id.clone()) {
                    Ok(fill)
                } else {
                    Err(RecordError::DuplicateId(fill.id))
                }
            });

            match checked {
                Ok(fill) => valid.push(fill),
                Err(error) => {
                    let invalid = InvalidRecord {
                        position,
                        id: record.id.as_ref().and_then(RawValue::as_text),
                        error,
                    };
                    warn!("Skipping fill-up: {}", invalid);
                    rejected.push(invalid);
                }
            }
        }
        rejected.sort_by_key(|invalid| invalid.position);

        let fill_ups = NormalizedFillUps::from_fill_ups(valid);
        debug!(
            "Normalized {} fill-ups across {} vehicles ({} rejected)",
            fill_ups.len(),
            fill_ups.histories.len(),
            rejected.len()
        );

        NormalizeOutcome { fill_ups, rejected }
    }
}
