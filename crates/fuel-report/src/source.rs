//! Fill-up and Vehicle Sources

use crate::error::ReportError;
use fill_validator::RawBatch;
use fuel_record::{RawFillUp, Vehicle, VehicleDirectory};
use serde::de::DeserializeOwned;
use serde_json::value::RawValue as RawJson;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplier of raw fill-ups.
///
/// Nothing is assumed about the order or validity of what a source returns.
/// Only a source that cannot be read at all is an error; unreadable
/// elements go into the batch as rejections.
pub trait FillUpSource {
    fn load(&self) -> Result<RawBatch, ReportError>;
}

/// Fill-ups read from a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FillUpSource for JsonFileSource {
    fn load(&self) -> Result<RawBatch, ReportError> {
        let elements: Vec<Box<RawJson>> = read_json(&self.path)?;
        let batch = parse_elements(&elements);
        debug!(
            "Loaded {} raw fill-ups from {} ({} unreadable)",
            batch.len(),
            self.path.display(),
            batch.unreadable().len()
        );
        Ok(batch)
    }
}

impl FillUpSource for Vec<RawFillUp> {
    fn load(&self) -> Result<RawBatch, ReportError> {
        Ok(RawBatch::from(self.clone()))
    }
}

/// Parse each array element on its own so one bad element only rejects itself
fn parse_elements(elements: &[Box<RawJson>]) -> RawBatch {
    let mut batch = RawBatch::new();
    for (position, element) in elements.iter().enumerate() {
        match serde_json::from_str::<RawFillUp>(element.get()) {
            Ok(record) => batch.push(position, record),
            Err(error) => batch.push_unreadable(position, None, error.to_string()),
        }
    }
    batch
}

/// Read a vehicle directory from a JSON array of `{id, displayName}`
pub fn load_directory(path: &Path) -> Result<VehicleDirectory, ReportError> {
    let vehicles: Vec<Vehicle> = read_json(path)?;
    debug!("Loaded {} vehicles from {}", vehicles.len(), path.display());
    Ok(vehicles.into_iter().collect())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReportError> {
    let text = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })
}
