//! Fuel Statistics Engine
//!
//! Pure, synchronous statistics over fill-up histories:
//! - Per-fill consumption series (volume per 100 distance units)
//! - Window selection by vehicle, date range and fuel attributes
//! - Scalar KPIs with `None` for insufficient data
//! - Brand/grade and monthly comparisons
//! - Per-fill metrics, rankings and imperial conversions
//!
//! Every query runs normalize → select → derive over borrowed input and
//! returns freshly allocated values.

mod aggregate;
mod consumption;
mod grouping;
mod per_fill;
mod rankings;
mod report;
pub mod units;
mod window;

pub use aggregate::{AggregateSummary, ImperialSummary};
pub use consumption::{
    point_between, ConsumptionPoint, ConsumptionSeries, MergedConsumption, MergedPoints, Points,
};
pub use grouping::{group, GroupBy, GroupKey, GroupSummary, Label, YearMonth};
pub use per_fill::{FillMetrics, PricePoint};
pub use rankings::{Rankings, VehicleEfficiency};
pub use report::{StatsEngine, StatsReport};
pub use units::UnitSystem;
pub use window::{Selection, Window};

pub use fill_validator::{InvalidRecord, NormalizeOutcome, NormalizedFillUps, Normalizer, RawBatch};
pub use fuel_record::{DateRange, FillUp, RawFillUp, SelectionError, VehicleDirectory, VehicleSelector};
