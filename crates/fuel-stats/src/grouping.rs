//! Categorical Grouping
//!
//! Partitions a window's fill-ups by brand, grade or calendar month. A
//! consumption point is attributed to the group of the fill-up that closes
//! it, since that is the fuel it measures.

use crate::aggregate::ratio;
use crate::consumption::ConsumptionPoint;
use chrono::{Datelike, NaiveDate};
use fuel_record::{FillUp, FillUpId};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Grouping dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupBy {
    BrandGrade,
    Brand,
    Grade,
    Month,
}

/// A brand or grade, or the explicit bucket for fill-ups without one.
///
/// Serializes as the name, or `null` when unspecified. Unspecified sorts
/// after every named value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Named(String),
    Unspecified,
}

impl Label {
    fn of(value: Option<&str>) -> Self {
        match value {
            Some(name) => Label::Named(name.to_string()),
            None => Label::Unspecified,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Label::Named(name) => Some(name),
            Label::Unspecified => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("unspecified"))
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.name().serialize(serializer)
    }
}

/// Calendar month, formatted `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Key of one group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GroupKey {
    BrandGrade { brand: Label, grade: Label },
    Brand { brand: Label },
    Grade { grade: Label },
    Month { month: YearMonth },
}

impl GroupKey {
    pub fn of(fill: &FillUp, by: GroupBy) -> Self {
        let brand = || Label::of(fill.fuel_brand.as_deref());
        let grade = || Label::of(fill.fuel_grade.as_deref());
        match by {
            GroupBy::BrandGrade => GroupKey::BrandGrade {
                brand: brand(),
                grade: grade(),
            },
            GroupBy::Brand => GroupKey::Brand { brand: brand() },
            GroupBy::Grade => GroupKey::Grade { grade: grade() },
            GroupBy::Month => GroupKey::Month {
                month: YearMonth::of(fill.date),
            },
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::BrandGrade { brand, grade } => write!(f, "{} / {}", brand, grade),
            GroupKey::Brand { brand } => write!(f, "{}", brand),
            GroupKey::Grade { grade } => write!(f, "{}", grade),
            GroupKey::Month { month } => write!(f, "{}", month),
        }
    }
}

/// KPIs of one group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub key: GroupKey,
    pub fill_up_count: usize,
    pub total_spend: f64,
    pub total_liters: f64,
    pub avg_cost_per_liter: Option<f64>,
    /// Liters per 100 distance units over the points closing in this group
    pub avg_consumption: Option<f64>,
}

#[derive(Default)]
struct Accumulator {
    fill_up_count: usize,
    spend: f64,
    liters: f64,
    liters_used: f64,
    distance: u64,
}

/// Partition fill-ups by `by`.
///
/// Groups come back in key order, so months are chronological. Every
/// fill-up lands in exactly one group and no group is empty. Points whose
/// closing fill-up is not among `fill_ups` are ignored.
pub fn group(fill_ups: &[&FillUp], points: &[ConsumptionPoint], by: GroupBy) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<GroupKey, Accumulator> = BTreeMap::new();
    let mut key_of: HashMap<&FillUpId, GroupKey> = HashMap::with_capacity(fill_ups.len());

    for &fill in fill_ups {
        let key = GroupKey::of(fill, by);
        let acc = groups.entry(key.clone()).or_default();
        acc.fill_up_count += 1;
        acc.spend += fill.total_amount;
        acc.liters += fill.liters;
        key_of.insert(&fill.id, key);
    }

    for point in points {
        if let Some(acc) = key_of.get(&point.fill_up_id).and_then(|key| groups.get_mut(key)) {
            acc.liters_used += point.liters_used;
            acc.distance += point.distance;
        }
    }

    groups
        .into_iter()
        .map(|(key, acc)| GroupSummary {
            key,
            fill_up_count: acc.fill_up_count,
            total_spend: acc.spend,
            total_liters: acc.liters,
            avg_cost_per_liter: ratio(acc.spend, acc.liters),
            avg_consumption: ratio(acc.liters_used, acc.distance as f64).map(|c| c * 100.0),
        })
        .collect()
}
