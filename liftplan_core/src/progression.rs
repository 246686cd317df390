//! Expansion of the static templates into a seven week progression.
//!
//! - Weeks 1-3: first cycle at the lifter's training maxes
//! - Weeks 4-6: second cycle with every training max raised by 2%
//! - Week 7: deload, also at the raised training max

use crate::templates::{deload_template, working_template};
use crate::types::{
    DeloadType, Movement, Progression, Session, Week, MAX_TRAINING_MAX, TM_INCREASE_FACTOR,
};

/// Weeks in a progression
pub const PROGRESSION_WEEKS: usize = 7;

/// Zero-based index of the deload week
pub const DELOAD_WEEK: usize = 6;

const CYCLE_WEEKS: usize = 3;

/// Generate an uncalculated progression for `movements`.
///
/// The movements themselves are never modified; each week works on its own
/// copies.
pub fn new_progression(movements: &[Movement], deload: DeloadType) -> Progression {
    let weeks = (0..PROGRESSION_WEEKS)
        .map(|index| new_week(index, movements, deload))
        .collect();
    Progression { weeks }
}

fn new_week(index: usize, movements: &[Movement], deload: DeloadType) -> Week {
    let is_deload = index == DELOAD_WEEK;
    let template = if is_deload {
        deload_template(deload)
    } else {
        working_template(index % CYCLE_WEEKS)
    };

    let sessions = movements
        .iter()
        .map(|m| {
            let mut movement = if index >= CYCLE_WEEKS {
                escalate(m)
            } else {
                m.clone()
            };
            movement.training_max = movement.training_max.min(MAX_TRAINING_MAX);
            Session::from_template(&movement, template)
        })
        .collect();

    Week {
        sessions,
        deload: is_deload,
        recommend_plates: false,
    }
}

/// Copy of `movement` with its training max raised for the next cycle
pub fn escalate(movement: &Movement) -> Movement {
    let mut next = movement.clone();
    next.training_max += movement.training_max * TM_INCREASE_FACTOR;
    next.calculated = true;
    next
}
