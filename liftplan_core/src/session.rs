//! Session lookups and the policy mutators that insert extra sets.
//!
//! Mutators work on an uncalculated session and always copy an existing
//! Working set as the starting point:
//! - Warm-ups: a descending ladder below the first working set, ending on
//!   the empty bar
//! - Jokers: an ascending ladder above the last working set
//! - First Set Last: back-off work at the first working set's percentage

use crate::gear::Gear;
use crate::types::{Movement, Session, Set, SetTemplate, SetType, StrategyType};
use crate::{Error, Result};

/// Percentage points between warm-up sets
const WARMUP_STEP: f64 = 10.0;

/// Warm-up sets above the empty bar
const MAX_WARMUP_SETS: usize = 4;

const WARMUP_REPS: u32 = 5;

const BAR_WARMUP_REPS: u32 = 10;

/// Percentage points between joker sets
const JOKER_STEP: f64 = 5.0;

/// Jokers stop once this percentage of the training max is reached
const JOKER_CEILING: f64 = 120.0;

const FSL_MULTI_SETS: usize = 5;

const FSL_MULTI_REPS: u32 = 8;

const FSL_REPS: u32 = 10;

impl Session {
    /// Build a session of Working sets for `movement` from a template
    pub fn from_template(movement: &Movement, template: &[SetTemplate]) -> Self {
        Self {
            sets: template.iter().map(|t| Set::working(movement, t)).collect(),
        }
    }

    /// First set of the given type
    pub fn first(&self, set_type: SetType) -> Result<&Set> {
        self.sets
            .iter()
            .find(|s| s.set_type == set_type)
            .ok_or(Error::SetTypeNotFound(set_type))
    }

    /// Last set of the given type
    pub fn last(&self, set_type: SetType) -> Result<&Set> {
        self.sets
            .iter()
            .rev()
            .find(|s| s.set_type == set_type)
            .ok_or(Error::SetTypeNotFound(set_type))
    }

    /// Position of the first set of the given type
    pub fn set_type_index(&self, set_type: SetType) -> Option<usize> {
        self.sets.iter().position(|s| s.set_type == set_type)
    }

    pub fn count_set_type(&self, set_type: SetType) -> usize {
        self.sets.iter().filter(|s| s.set_type == set_type).count()
    }

    /// Prepend up to five warm-up sets.
    ///
    /// Works down from the first working set in 10% steps until the empty
    /// bar is reached or four sets were added, then finishes with a set of
    /// ten on the empty bar.
    pub fn add_warmup(&mut self, gear: &Gear) -> Result<()> {
        let mut set = self.first(SetType::Working)?.clone();
        let floor = set.movement.floor(gear)?;

        set.reps = WARMUP_REPS;
        set.amrap = false;
        set.set_type = SetType::Warmup;

        let mut warmups = Vec::with_capacity(MAX_WARMUP_SETS + 1);
        loop {
            set.percent -= WARMUP_STEP;
            if set.percent <= floor || warmups.len() == MAX_WARMUP_SETS {
                let mut bar_set = set;
                bar_set.percent = floor;
                bar_set.reps = BAR_WARMUP_REPS;
                warmups.push(bar_set);
                break;
            }
            warmups.push(set.clone());
        }

        warmups.reverse();
        self.sets.splice(0..0, warmups);
        Ok(())
    }

    /// Append joker sets in 5% steps above the last working set
    pub fn add_jokers(&mut self) -> Result<()> {
        let mut set = self.last(SetType::Working)?.clone();
        set.set_type = SetType::Joker;
        set.amrap = false;

        while set.percent < JOKER_CEILING {
            set.percent += JOKER_STEP;
            self.sets.push(set.clone());
        }
        Ok(())
    }

    /// Append five sets of eight at the first working set's percentage
    pub fn add_fsl_multi(&mut self) -> Result<()> {
        let mut set = self.first(SetType::Working)?.clone();
        set.set_type = SetType::Auxiliary;
        set.reps = FSL_MULTI_REPS;
        set.amrap = false;

        self.sets
            .extend(std::iter::repeat(set).take(FSL_MULTI_SETS));
        Ok(())
    }

    /// Append one AMRAP set of ten at the first working set's percentage
    pub fn add_fsl(&mut self) -> Result<()> {
        let mut set = self.first(SetType::Working)?.clone();
        set.set_type = SetType::Auxiliary;
        set.reps = FSL_REPS;
        set.amrap = true;

        self.sets.push(set);
        Ok(())
    }

    pub fn add_auxiliary(&mut self, strategy: StrategyType) -> Result<()> {
        match strategy {
            StrategyType::FslMulti => self.add_fsl_multi(),
            StrategyType::Fsl => self.add_fsl(),
        }
    }
}
