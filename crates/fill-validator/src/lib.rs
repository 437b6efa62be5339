//! Fill-up Validation and Normalization
//!
//! Turns an untrusted, arbitrarily ordered batch of fill-ups into per-vehicle
//! chronological histories. Malformed records are reported, never fatal.

mod error;
mod normalizer;
mod validator;

pub use error::{InvalidRecord, RecordError};
pub use normalizer::{NormalizeOutcome, NormalizedFillUps, Normalizer, RawBatch};
pub use validator::{ValidationConfig, Validator};
