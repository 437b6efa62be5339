//! Unit Conversion
//!
//! Fill-ups are recorded in liters and kilometers. These helpers produce the
//! imperial figures (US gallons, miles, MPG) a display surface may ask for.
//! Nothing in the engine rounds; [`round_to`] is for presentation.

use serde::{Deserialize, Serialize};

const GALLONS_PER_LITER: f64 = 0.264172;
const MILES_PER_KM: f64 = 0.621371;
/// `MPG = MPG_FACTOR / (L/100km)`
const MPG_FACTOR: f64 = 235.2145;

/// Unit system a report is presented in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn is_imperial(self) -> bool {
        self == UnitSystem::Imperial
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(format!("unknown unit system: {}", other)),
        }
    }
}

/// Convert liters to US gallons
pub fn liters_to_gallons(liters: f64) -> f64 {
    liters * GALLONS_PER_LITER
}

/// Convert US gallons to liters
pub fn gallons_to_liters(gallons: f64) -> f64 {
    gallons / GALLONS_PER_LITER
}

/// Convert kilometers to miles
pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

/// Convert miles to kilometers
pub fn miles_to_km(miles: f64) -> f64 {
    miles / MILES_PER_KM
}

/// Miles per US gallon for a volume burned over a distance.
///
/// `None` when no fuel was used.
pub fn mpg(liters: f64, km: f64) -> Option<f64> {
    if liters <= 0.0 {
        return None;
    }
    let value = km_to_miles(km) / liters_to_gallons(liters);
    value.is_finite().then_some(value)
}

/// Convert L/100km to MPG; `None` for non-positive consumption
pub fn l_per_100km_to_mpg(consumption: f64) -> Option<f64> {
    if consumption > 0.0 {
        Some(MPG_FACTOR / consumption)
    } else {
        None
    }
}

/// Round to a number of decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liters_gallons_conversion() {
        assert!((liters_to_gallons(3.78541) - 1.0).abs() < 0.001);
        assert!((gallons_to_liters(1.0) - 3.78541).abs() < 0.001);
    }

    #[test]
    fn test_km_miles_conversion() {
        assert!((km_to_miles(100.0) - 62.1371).abs() < 1e-9);
        assert!((miles_to_km(62.1371) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_mpg() {
        assert!((l_per_100km_to_mpg(7.6).unwrap() - 30.949).abs() < 0.001);
        assert_eq!(l_per_100km_to_mpg(0.0), None);
        assert_eq!(l_per_100km_to_mpg(-1.0), None);

        // 38 L over 500 km is 7.6 L/100km either way.
        let direct = mpg(38.0, 500.0).unwrap();
        assert!((direct - 30.949).abs() < 0.01);
        assert_eq!(mpg(0.0, 500.0), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(7.6049, 2), 7.6);
        assert_eq!(round_to(1.005, 0), 1.0);
        assert_eq!(round_to(30.949, 1), 30.9);
    }

    #[test]
    fn test_unit_system_parse() {
        assert_eq!("Imperial".parse::<UnitSystem>(), Ok(UnitSystem::Imperial));
        assert_eq!("metric".parse::<UnitSystem>(), Ok(UnitSystem::Metric));
        assert!("furlongs".parse::<UnitSystem>().is_err());
    }
}
