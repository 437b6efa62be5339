//! Vehicle Directory

use crate::{SelectionError, VehicleId, VehicleSelector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A vehicle as listed by the vehicle directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub display_name: String,
}

/// Known vehicles and their display names.
///
/// Only used to label output and to reject selectors naming unknown
/// vehicles; the statistics never read it.
#[derive(Debug, Clone, Default)]
pub struct VehicleDirectory {
    vehicles: BTreeMap<VehicleId, String>,
}

impl VehicleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: VehicleId, display_name: impl Into<String>) {
        self.vehicles.insert(id, display_name.into());
    }

    pub fn contains(&self, id: &VehicleId) -> bool {
        self.vehicles.contains_key(id)
    }

    pub fn display_name(&self, id: &VehicleId) -> Option<&str> {
        self.vehicles.get(id).map(String::as_str)
    }

    /// Display name, falling back to the raw id for unlisted vehicles
    pub fn label(&self, id: &VehicleId) -> String {
        self.display_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    /// Fail on a selector naming a vehicle that is not listed
    pub fn check(&self, selector: &VehicleSelector) -> Result<(), SelectionError> {
        match selector {
            VehicleSelector::All => Ok(()),
            VehicleSelector::Vehicle(id) if self.contains(id) => Ok(()),
            VehicleSelector::Vehicle(id) => Err(SelectionError::UnknownVehicle(id.clone())),
        }
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VehicleId, &str)> {
        self.vehicles.iter().map(|(id, name)| (id, name.as_str()))
    }
}

impl FromIterator<Vehicle> for VehicleDirectory {
    fn from_iter<I: IntoIterator<Item = Vehicle>>(iter: I) -> Self {
        Self {
            vehicles: iter
                .into_iter()
                .map(|v| (v.id, v.display_name))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> VehicleDirectory {
        vec![
            Vehicle {
                id: VehicleId::new("car-1"),
                display_name: "Golf".to_string(),
            },
            Vehicle {
                id: VehicleId::new("van-2"),
                display_name: "Transit".to_string(),
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_labels() {
        let dir = directory();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.label(&VehicleId::new("car-1")), "Golf");
        assert_eq!(dir.label(&VehicleId::new("bike-9")), "bike-9");
    }

    #[test]
    fn test_check_selector() {
        let dir = directory();
        assert!(dir.check(&VehicleSelector::All).is_ok());
        assert!(dir.check(&VehicleSelector::vehicle("van-2")).is_ok());
        assert_eq!(
            dir.check(&VehicleSelector::vehicle("bike-9")),
            Err(SelectionError::UnknownVehicle(VehicleId::new("bike-9")))
        );
    }
}
