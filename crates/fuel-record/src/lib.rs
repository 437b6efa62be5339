//! Fuel Records
//!
//! Fill-up records as delivered by the fill-up source (`RawFillUp`) and after
//! validation (`FillUp`), plus the selection types every statistics query is
//! scoped by.

mod error;
mod fill_up;
mod selection;
mod vehicle;

pub use error::SelectionError;
pub use fill_up::{FillUp, FillUpId, RawFillUp, RawValue, VehicleId};
pub use selection::{DateRange, VehicleSelector};
pub use vehicle::{Vehicle, VehicleDirectory};
