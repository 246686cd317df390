//! Barbell and plate equipment model.
//!
//! `Gear` combines a bar, an available set of plates and the unit the
//! lifter wants to read weights in. It turns a calculated target weight
//! into the heaviest weight that can actually be loaded, and recommends
//! the plates to put on each side of the bar.

use crate::units::{convert_from_to, Unit};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance for a requested weight sitting just under the bar weight.
const BAR_EPSILON: f64 = 0.0001;

/// Most plates a recommendation may load on one side of the bar
pub const MAX_PLATES_PER_SIDE: usize = 100;

/// Standard men's 20 KG barbell
pub const MENS_BAR_KG: Bar = Bar {
    weight: 20.0,
    unit: Unit::Kg,
};

/// Standard men's 45 LBS barbell
pub const MENS_BAR_LBS: Bar = Bar {
    weight: 45.0,
    unit: Unit::Lbs,
};

/// Standard women's 15 KG barbell
pub const WOMENS_BAR_KG: Bar = Bar {
    weight: 15.0,
    unit: Unit::Kg,
};

/// Standard women's 35 LBS barbell
pub const WOMENS_BAR_LBS: Bar = Bar {
    weight: 35.0,
    unit: Unit::Lbs,
};

/// Default plate increments in KG
pub const DEFAULT_WEIGHTS_KG: [f64; 6] = [1.25, 2.5, 5.0, 10.0, 15.0, 20.0];

/// Default plate increments in LBS
pub const DEFAULT_WEIGHTS_LBS: [f64; 6] = [2.5, 5.0, 10.0, 25.0, 35.0, 45.0];

// ============================================================================
// Bar
// ============================================================================

/// Weight and unit of a barbell
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub weight: f64,
    pub unit: Unit,
}

impl Bar {
    /// Bar weight expressed in `unit`
    pub fn convert_to(&self, unit: Unit) -> f64 {
        convert_from_to(self.weight, self.unit, unit)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(Error::InvalidWeight(self.weight));
        }
        Ok(())
    }
}

impl fmt::Display for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weight: {}, Unit: {}", self.weight, self.unit)
    }
}

// ============================================================================
// Plates
// ============================================================================

/// An available set of plate increments and their unit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plates {
    pub weights: Vec<f64>,
    pub unit: Unit,
}

impl Plates {
    /// Build a plate set, normalizing the weights
    pub fn new(weights: impl IntoIterator<Item = f64>, unit: Unit) -> Self {
        Self {
            weights: tidy(weights.into_iter().collect()),
            unit,
        }
    }

    /// The default plate set for a unit
    pub fn default_for(unit: Unit) -> Self {
        match unit {
            Unit::Kg => Self::new(DEFAULT_WEIGHTS_KG, Unit::Kg),
            Unit::Lbs => Self::new(DEFAULT_WEIGHTS_LBS, Unit::Lbs),
        }
    }

    /// Remove duplicates and non-positive plates and sort ascending
    pub fn tidy(&mut self) {
        self.weights = tidy(std::mem::take(&mut self.weights));
    }

    pub fn add(&mut self, plate: f64) {
        self.weights.push(plate);
        self.tidy();
    }

    pub fn remove(&mut self, plate: f64) {
        self.tidy();
        self.weights.retain(|w| *w != plate);
    }

    /// Smallest plate increment
    pub fn min(&self) -> Result<f64> {
        tidy(self.weights.clone())
            .first()
            .copied()
            .ok_or(Error::NoPlatesFound)
    }

    /// Largest multiple of twice the smallest increment that is not above
    /// `weight`. Plates go on in pairs, one per side.
    pub fn round(&self, weight: f64) -> Result<f64> {
        let step = self.min()? * 2.0;
        Ok((weight / step).trunc() * step)
    }

    pub fn validate(&self) -> Result<()> {
        match self.weights.iter().find(|w| w.is_infinite()) {
            Some(w) => Err(Error::InvalidWeight(*w)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Plates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weights: Vec<String> = self.weights.iter().map(|w| w.to_string()).collect();
        write!(f, "Weights: [{}], Unit: {}", weights.join(" "), self.unit)
    }
}

fn tidy(mut weights: Vec<f64>) -> Vec<f64> {
    weights.retain(|w| *w > 0.0);
    weights.sort_by(f64::total_cmp);
    weights.dedup();
    weights
}

/// Greedy recommendation of the plates to load on ONE side of the bar so
/// that both sides together add up to as much of `weight` as possible.
///
/// The result is sorted ascending. Fails with `InvalidWeight` when `weight`
/// would need more than `MAX_PLATES_PER_SIDE` plates per side.
pub fn recommend(weight: f64, plates: &[f64]) -> Result<Vec<f64>> {
    let plates = tidy(plates.to_vec());
    if plates.is_empty() {
        return Err(Error::NoPlatesFound);
    }

    let mut remaining = weight;
    let mut rec = Vec::new();
    for plate in plates.iter().rev() {
        let pair = plate * 2.0;
        let count = (remaining / pair).trunc().max(0.0);
        if rec.len() as f64 + count > MAX_PLATES_PER_SIDE as f64 {
            return Err(Error::InvalidWeight(weight));
        }
        rec.extend(std::iter::repeat(*plate).take(count as usize));
        remaining -= count * pair;
    }

    rec.sort_by(f64::total_cmp);
    Ok(rec)
}

// ============================================================================
// Gear
// ============================================================================

/// Bar, plates, and the unit results are reported in.
///
/// Bar and plates may be in a different unit than the gear itself; every
/// calculation converts as needed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gear {
    pub bar: Bar,
    pub plates: Plates,
    pub unit: Unit,
}

impl Default for Gear {
    fn default() -> Self {
        Self::default_for(Unit::Lbs)
    }
}

impl Gear {
    /// Men's bar and default plates for `unit`
    pub fn default_for(unit: Unit) -> Self {
        let bar = match unit {
            Unit::Kg => MENS_BAR_KG,
            Unit::Lbs => MENS_BAR_LBS,
        };
        Self {
            bar,
            plates: Plates::default_for(unit),
            unit,
        }
    }

    /// Minimum loadable weight: the empty bar in gear units
    pub fn min(&self) -> f64 {
        self.bar.convert_to(self.unit)
    }

    pub fn validate(&self) -> Result<()> {
        self.bar.validate()?;
        self.plates.validate()
    }

    /// Round `weight` down to the heaviest total the plates can build.
    ///
    /// Fails with `InputLessThanBar` if `weight` is lighter than the bar.
    pub fn round(&self, weight: f64) -> Result<f64> {
        self.validate()?;
        let (bar, excess) = self.split(weight)?;
        if weight == bar {
            return Ok(weight);
        }

        let excess = convert_from_to(excess, self.unit, self.plates.unit);
        let rounded = self.plates.round(excess)?;
        Ok(bar + convert_from_to(rounded, self.plates.unit, self.unit))
    }

    /// Per-side plate recommendation for a total bar weight of `weight`
    pub fn recommend(&self, weight: f64) -> Result<Vec<f64>> {
        self.validate()?;
        let (_, excess) = self.split(weight)?;
        let excess = convert_from_to(excess, self.unit, self.plates.unit);
        recommend(excess, &self.plates.weights)
    }

    /// Split a total weight into bar and plate weight, both in gear units
    fn split(&self, weight: f64) -> Result<(f64, f64)> {
        if !weight.is_finite() {
            return Err(Error::InvalidWeight(weight));
        }
        let bar = self.min();
        if weight - bar < -BAR_EPSILON {
            return Err(Error::InputLessThanBar { weight, bar });
        }
        Ok((bar, weight - bar))
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unit: {}, Bar: {{ {} }}, Plates: {{ {} }}",
            self.unit, self.bar, self.plates
        )
    }
}
