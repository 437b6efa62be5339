//! Query Selection Types

use crate::{SelectionError, VehicleId};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Which vehicles a query covers
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleSelector {
    /// Every vehicle in the history
    #[default]
    All,
    /// A single vehicle
    Vehicle(VehicleId),
}

impl VehicleSelector {
    pub fn vehicle(id: impl Into<String>) -> Self {
        VehicleSelector::Vehicle(VehicleId::new(id))
    }

    /// Whether a fill-up of `vehicle_id` falls under this selector
    pub fn matches(&self, vehicle_id: &VehicleId) -> bool {
        match self {
            VehicleSelector::All => true,
            VehicleSelector::Vehicle(id) => id == vehicle_id,
        }
    }

    pub fn vehicle_id(&self) -> Option<&VehicleId> {
        match self {
            VehicleSelector::All => None,
            VehicleSelector::Vehicle(id) => Some(id),
        }
    }
}

impl FromStr for VehicleSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            Ok(VehicleSelector::All)
        } else {
            Ok(VehicleSelector::vehicle(s))
        }
    }
}

impl From<String> for VehicleSelector {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(selector) => selector,
            Err(never) => match never {},
        }
    }
}

impl From<VehicleSelector> for String {
    fn from(selector: VehicleSelector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for VehicleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleSelector::All => f.write_str("all"),
            VehicleSelector::Vehicle(id) => write!(f, "{}", id),
        }
    }
}

/// Inclusive calendar date range `[start, end]`.
///
/// A range whose start lies after its end is *degenerate*: it contains no
/// dates and spans no days. [`DateRange::validate`] turns it into a
/// [`SelectionError`] for callers that must fail loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` calendar days ending at `end`, both ends included.
    /// A zero-day request is treated as one day.
    pub fn last_days(end: NaiveDate, days: u32) -> Self {
        let back = u64::from(days.max(1) - 1);
        let start = end.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// January 1st of `today`'s year through `today`
    pub fn year_to_date(today: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self { start, end: today }
    }

    /// The whole calendar year
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    pub fn is_degenerate(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, counting both ends
    pub fn days(&self) -> Option<u64> {
        if self.is_degenerate() {
            return None;
        }
        let span = self.end.signed_duration_since(self.start).num_days();
        u64::try_from(span).ok().map(|d| d + 1)
    }

    pub fn validate(self) -> Result<Self, SelectionError> {
        if self.is_degenerate() {
            Err(SelectionError::InvertedRange {
                start: self.start,
                end: self.end,
            })
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
