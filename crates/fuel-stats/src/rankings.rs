//! Best/worst Fill-ups and Vehicle Efficiency

use crate::aggregate::ratio;
use crate::consumption::ConsumptionPoint;
use fuel_record::VehicleId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Average consumption of one vehicle over a window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleEfficiency {
    pub vehicle_id: VehicleId,
    pub avg_consumption: f64,
    pub total_distance: u64,
}

/// Extremes of a window's consumption.
///
/// Lower consumption is better. Ties go to the earliest point and to the
/// vehicle with the smallest id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub best_fill_up: Option<ConsumptionPoint>,
    pub worst_fill_up: Option<ConsumptionPoint>,
    pub most_efficient_vehicle: Option<VehicleEfficiency>,
    pub least_efficient_vehicle: Option<VehicleEfficiency>,
}

impl Rankings {
    /// Rank points given in date order
    pub fn compute(points: &[ConsumptionPoint]) -> Self {
        let mut best: Option<&ConsumptionPoint> = None;
        let mut worst: Option<&ConsumptionPoint> = None;
        for point in points {
            let value = point.consumption_per_distance;
            if best.map_or(true, |b| value < b.consumption_per_distance) {
                best = Some(point);
            }
            if worst.map_or(true, |w| value > w.consumption_per_distance) {
                worst = Some(point);
            }
        }

        let vehicles = Self::vehicle_efficiency(points);
        let mut most: Option<&VehicleEfficiency> = None;
        let mut least: Option<&VehicleEfficiency> = None;
        for vehicle in &vehicles {
            if most.map_or(true, |m| vehicle.avg_consumption < m.avg_consumption) {
                most = Some(vehicle);
            }
            if least.map_or(true, |l| vehicle.avg_consumption > l.avg_consumption) {
                least = Some(vehicle);
            }
        }

        Self {
            best_fill_up: best.cloned(),
            worst_fill_up: worst.cloned(),
            most_efficient_vehicle: most.cloned(),
            least_efficient_vehicle: least.cloned(),
        }
    }

    /// Per-vehicle average consumption, vehicles in id order.
    ///
    /// Vehicles without points do not appear.
    pub fn vehicle_efficiency(points: &[ConsumptionPoint]) -> Vec<VehicleEfficiency> {
        let mut totals: BTreeMap<&VehicleId, (f64, u64)> = BTreeMap::new();
        for point in points {
            let entry = totals.entry(&point.vehicle_id).or_insert((0.0, 0));
            entry.0 += point.liters_used;
            entry.1 += point.distance;
        }

        totals
            .into_iter()
            .filter_map(|(vehicle_id, (liters, distance))| {
                Some(VehicleEfficiency {
                    vehicle_id: vehicle_id.clone(),
                    avg_consumption: ratio(liters, distance as f64)? * 100.0,
                    total_distance: distance,
                })
            })
            .collect()
    }
}
