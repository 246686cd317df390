//! Mass units and conversion between them.
//!
//! Only two units exist: kilograms and pounds. Anything else is rejected
//! when parsed, so a `Unit` value is always one of the two.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The weight of 1 KG in LBS
pub const CONVERSION_FACTOR_KG_TO_LBS: f64 = 2.20462262185;

/// Unit used to measure weights
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    /// Kilograms
    Kg,
    /// Pounds
    Lbs,
}

impl Unit {
    pub const ALL: [Unit; 2] = [Unit::Kg, Unit::Lbs];

    /// Canonical string form used in JSON and TOML
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "KG",
            Unit::Lbs => "LBS",
        }
    }

    /// Validation predicate for raw unit strings
    pub fn is_valid(s: &str) -> bool {
        s.parse::<Unit>().is_ok()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "KG" => Ok(Unit::Kg),
            "LBS" => Ok(Unit::Lbs),
            _ => Err(Error::InvalidUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}

/// Convert `weight` from one unit into another.
///
/// Returns the weight untouched when both units match. For example
/// `convert_from_to(55.0, Unit::Lbs, Unit::Kg)` is roughly `24.9476`.
pub fn convert_from_to(weight: f64, from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Kg, Unit::Kg) | (Unit::Lbs, Unit::Lbs) => weight,
        (Unit::Lbs, Unit::Kg) => weight / CONVERSION_FACTOR_KG_TO_LBS,
        (Unit::Kg, Unit::Lbs) => weight * CONVERSION_FACTOR_KG_TO_LBS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_convert_same_unit_is_identity() {
        assert_eq!(convert_from_to(45.0, Unit::Lbs, Unit::Lbs), 45.0);
        assert_eq!(convert_from_to(20.0, Unit::Kg, Unit::Kg), 20.0);
    }

    #[test]
    fn test_convert_between_units() {
        assert_approx_eq!(convert_from_to(45.0, Unit::Lbs, Unit::Kg), 20.411656649988664);
        assert_approx_eq!(convert_from_to(15.0, Unit::Kg, Unit::Lbs), 33.06933932775);
        assert_approx_eq!(convert_from_to(55.0, Unit::Lbs, Unit::Kg), 24.9476, 1e-4);
    }

    #[test]
    fn test_convert_roundtrip() {
        for w in [0.5, 1.25, 45.0, 137.7, 500.0, 2000.0] {
            for a in Unit::ALL {
                for b in Unit::ALL {
                    let back = convert_from_to(convert_from_to(w, a, b), b, a);
                    assert_approx_eq!(back, w, 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("KG".parse::<Unit>().unwrap(), Unit::Kg);
        assert_eq!("lbs".parse::<Unit>().unwrap(), Unit::Lbs);
        assert!(matches!("pood".parse::<Unit>(), Err(Error::InvalidUnit(_))));
        assert!(Unit::is_valid("kg"));
        assert!(!Unit::is_valid(""));
    }

    #[test]
    fn test_unit_json() {
        assert_eq!(serde_json::to_string(&Unit::Lbs).unwrap(), r#""LBS""#);
        let unit: Unit = serde_json::from_str(r#""KG""#).unwrap();
        assert_eq!(unit, Unit::Kg);
        assert!(serde_json::from_str::<Unit>(r#""stone""#).is_err());
        assert!(serde_json::from_str::<Unit>("5").is_err());
    }
}
