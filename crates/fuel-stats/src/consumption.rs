//! Consumption Series
//!
//! Consumption is derived from consecutive fill-ups of the same vehicle: the
//! liters bought at the later fill are what the engine burned over the
//! distance driven since the earlier one.
//!
//! Pairs whose odometer delta is zero or negative are skipped. That covers
//! odometer replacements, rollovers and back-dated entries; none of them
//! yield a meaningful distance, and a skipped pair never fails the series.

use chrono::NaiveDate;
use fuel_record::{FillUp, FillUpId, VehicleId};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::slice::Windows;

/// Consumption between one fill-up and the previous fill of the same vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionPoint {
    pub vehicle_id: VehicleId,
    /// The later fill of the pair
    pub fill_up_id: FillUpId,
    /// Date of the later fill
    pub date: NaiveDate,
    /// Odometer delta, always > 0
    pub distance: u64,
    /// Liters of the later fill
    pub liters_used: f64,
    /// Money spent at the later fill
    pub amount: f64,
    /// Liters per 100 distance units
    pub consumption_per_distance: f64,
}

/// Point for the pair `(prev, curr)`, or `None` when the odometer did not
/// advance.
pub fn point_between(prev: &FillUp, curr: &FillUp) -> Option<ConsumptionPoint> {
    let distance = curr
        .odometer_reading
        .checked_sub(prev.odometer_reading)
        .filter(|d| *d > 0)?;

    Some(ConsumptionPoint {
        vehicle_id: curr.vehicle_id.clone(),
        fill_up_id: curr.id.clone(),
        date: curr.date,
        distance,
        liters_used: curr.liters,
        amount: curr.total_amount,
        consumption_per_distance: curr.liters / distance as f64 * 100.0,
    })
}

/// Consumption series of one vehicle.
///
/// `history` must be a single vehicle's normalized history. The series is a
/// view: every call to [`ConsumptionSeries::iter`] starts over from the
/// first pair.
#[derive(Debug, Clone, Copy)]
pub struct ConsumptionSeries<'a> {
    history: &'a [FillUp],
}

impl<'a> ConsumptionSeries<'a> {
    pub fn new(history: &'a [FillUp]) -> Self {
        Self { history }
    }

    pub fn iter(&self) -> Points<'a> {
        Points {
            pairs: self.history.windows(2),
        }
    }

    /// Number of adjacent pairs that produced no point
    pub fn skipped_pairs(&self) -> usize {
        self.history
            .windows(2)
            .filter(|pair| pair[1].odometer_reading <= pair[0].odometer_reading)
            .count()
    }
}

impl<'a> IntoIterator for &ConsumptionSeries<'a> {
    type Item = ConsumptionPoint;
    type IntoIter = Points<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over one vehicle's consumption points
#[derive(Debug, Clone)]
pub struct Points<'a> {
    pairs: Windows<'a, FillUp>,
}

impl Iterator for Points<'_> {
    type Item = ConsumptionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        self.pairs.by_ref().find_map(|pair| point_between(&pair[0], &pair[1]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.pairs.size_hint().1)
    }
}

/// Consumption across several vehicles, merged by date.
///
/// Pairing happens inside each vehicle's history; vehicles never pair with
/// each other. Points on the same date keep the order of the histories
/// passed in.
#[derive(Debug, Clone)]
pub struct MergedConsumption<'a> {
    series: Vec<ConsumptionSeries<'a>>,
}

impl<'a> MergedConsumption<'a> {
    pub fn new(histories: impl IntoIterator<Item = &'a [FillUp]>) -> Self {
        Self {
            series: histories.into_iter().map(ConsumptionSeries::new).collect(),
        }
    }

    pub fn iter(&self) -> MergedPoints<'a> {
        MergedPoints::new(self.series.iter().map(ConsumptionSeries::iter).collect())
    }

    pub fn skipped_pairs(&self) -> usize {
        self.series.iter().map(ConsumptionSeries::skipped_pairs).sum()
    }
}

impl<'a> IntoIterator for &MergedConsumption<'a> {
    type Item = ConsumptionPoint;
    type IntoIter = MergedPoints<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy k-way merge of per-vehicle point iterators
#[derive(Debug)]
pub struct MergedPoints<'a> {
    sources: Vec<Points<'a>>,
    /// Next point of each source, if any
    pending: Vec<Option<ConsumptionPoint>>,
    /// (date, source index) of every pending point
    heads: BinaryHeap<Reverse<(NaiveDate, usize)>>,
}

impl<'a> MergedPoints<'a> {
    fn new(mut sources: Vec<Points<'a>>) -> Self {
        let mut pending = Vec::with_capacity(sources.len());
        let mut heads = BinaryHeap::with_capacity(sources.len());

        for (index, source) in sources.iter_mut().enumerate() {
            let next = source.next();
            if let Some(point) = &next {
                heads.push(Reverse((point.date, index)));
            }
            pending.push(next);
        }

        Self {
            sources,
            pending,
            heads,
        }
    }
}

impl Iterator for MergedPoints<'_> {
    type Item = ConsumptionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let Reverse((_, index)) = self.heads.pop()?;
        let point = self.pending[index].take()?;

        if let Some(next) = self.sources[index].next() {
            self.heads.push(Reverse((next.date, index)));
            self.pending[index] = Some(next);
        }

        Some(point)
    }
}
