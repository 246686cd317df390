//! Core domain types for the lift planner.
//!
//! This module defines the fundamental types used throughout the system:
//! - Set, deload and auxiliary strategy enumerations
//! - Movements and their training maxes
//! - The Progression -> Week -> Session -> Set plan tree

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::gear::Gear;
use crate::units::{convert_from_to, Unit};

/// Percent increase of a training max for the second cycle and the deload.
pub const TM_INCREASE_FACTOR: f64 = 0.02;

/// Absolute ceiling for any training max, in the movement's unit.
pub const MAX_TRAINING_MAX: f64 = 2000.0;

// ============================================================================
// Enumerations
// ============================================================================

/// Role of a set within a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SetType {
    /// Prescribed 5/3/1 work
    Working,
    /// Lighter sets ramping up to the first working set
    Warmup,
    /// First-set-last back-off work
    Auxiliary,
    /// Optional heavier singles after the top working set
    Joker,
}

impl SetType {
    pub const ALL: [SetType; 4] = [
        SetType::Working,
        SetType::Warmup,
        SetType::Auxiliary,
        SetType::Joker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SetType::Working => "Working",
            SetType::Warmup => "Warmup",
            SetType::Auxiliary => "Auxiliary",
            SetType::Joker => "Joker",
        }
    }
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SetType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidSetType(s.to_string()))
    }
}

impl TryFrom<String> for SetType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<SetType> for String {
    fn from(t: SetType) -> Self {
        t.as_str().to_string()
    }
}

/// Deload week template variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeloadType {
    /// 5x40%, 5x50%, 5x60%
    #[default]
    Deload1,
    /// 5x50%, 5x60%, 5x70%
    Deload2,
    /// 3x65%, 3x75%, 3x85%
    Deload3,
    /// 10x40%, 8x50%, 6x60%
    Deload4,
    /// 10x50%, 8x60%, 6x70%
    Deload5,
}

impl DeloadType {
    pub const ALL: [DeloadType; 5] = [
        DeloadType::Deload1,
        DeloadType::Deload2,
        DeloadType::Deload3,
        DeloadType::Deload4,
        DeloadType::Deload5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeloadType::Deload1 => "deload1",
            DeloadType::Deload2 => "deload2",
            DeloadType::Deload3 => "deload3",
            DeloadType::Deload4 => "deload4",
            DeloadType::Deload5 => "deload5",
        }
    }
}

impl fmt::Display for DeloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeloadType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DeloadType::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidDeloadType(s.to_string()))
    }
}

impl TryFrom<String> for DeloadType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<DeloadType> for String {
    fn from(d: DeloadType) -> Self {
        d.as_str().to_string()
    }
}

/// Auxiliary back-off strategy appended after the working sets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StrategyType {
    /// First Set Last, five sets of eight
    #[default]
    FslMulti,
    /// First Set Last, a single AMRAP set of ten
    Fsl,
}

impl StrategyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyType::FslMulti => "FSL Multiple Sets",
            StrategyType::Fsl => "FSL",
        }
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fsl multiple sets" | "multi" => Ok(StrategyType::FslMulti),
            "fsl" | "single" => Ok(StrategyType::Fsl),
            _ => Err(Error::StrategyNotImplemented(s.to_string())),
        }
    }
}

impl TryFrom<String> for StrategyType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<StrategyType> for String {
    fn from(s: StrategyType) -> Self {
        s.as_str().to_string()
    }
}

// ============================================================================
// Movement
// ============================================================================

/// A tracked lift (deadlift, bench press, ...) and its training max
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub name: String,
    pub training_max: f64,
    pub unit: Unit,
    /// Set once the training max has been escalated for this cycle
    #[serde(default)]
    pub calculated: bool,
}

impl Movement {
    pub fn new(name: impl Into<String>, training_max: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            training_max,
            unit,
            calculated: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.training_max.is_finite() || self.training_max <= 0.0 {
            return Err(Error::InvalidWeight(self.training_max));
        }
        Ok(())
    }

    /// `weight` (in `unit`) as a percentage of the training max
    pub fn percent_of_max(&self, weight: f64, unit: Unit) -> f64 {
        convert_from_to(weight, unit, self.unit) / self.training_max * 100.0
    }

    /// The empty bar as a percentage of the training max
    pub fn floor(&self, gear: &Gear) -> Result<f64> {
        self.validate()?;
        gear.validate()?;
        Ok(self.percent_of_max(gear.min(), gear.unit))
    }
}

// ============================================================================
// Plan tree
// ============================================================================

/// Percent/reps/AMRAP triple of a static template
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetTemplate {
    pub percent: f64,
    pub reps: u32,
    pub amrap: bool,
}

/// One prescribed set of a movement.
///
/// `weight` and `plates` stay empty until the set has been calculated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub movement: Movement,
    #[serde(rename = "percentage")]
    pub percent: f64,
    pub reps: u32,
    pub amrap: bool,
    #[serde(rename = "type")]
    pub set_type: SetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plates: Vec<f64>,
}

impl Set {
    /// Working set for `movement` from a template entry
    pub fn working(movement: &Movement, template: &SetTemplate) -> Self {
        Self {
            movement: movement.clone(),
            percent: template.percent,
            reps: template.reps,
            amrap: template.amrap,
            set_type: SetType::Working,
            weight: None,
            plates: Vec::new(),
        }
    }
}

/// All sets of one workout, in the order they are performed
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    pub sets: Vec<Set>,
}

/// One session per movement, plus deload and plate flags
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub sessions: Vec<Session>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deload: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub recommend_plates: bool,
}

impl Week {
    /// Human readable week number for a zero-based index
    pub fn display_number(index: usize) -> usize {
        index + 1
    }
}

/// The full multi-week plan
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progression {
    pub weeks: Vec<Week>,
}
