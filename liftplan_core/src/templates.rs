//! Static 5/3/1 percentage templates.
//!
//! Three working weeks and five deload variants. Every template entry is a
//! Working set; movements are attached when a session is built from it.

use crate::types::{DeloadType, SetTemplate};

const fn set(percent: f64, reps: u32, amrap: bool) -> SetTemplate {
    SetTemplate {
        percent,
        reps,
        amrap,
    }
}

/// Working set templates for weeks one to three of a cycle
pub static WORKING_SET_TEMPLATES: [[SetTemplate; 3]; 3] = [
    // 5s week
    [set(65.0, 5, false), set(75.0, 5, false), set(85.0, 5, true)],
    // 3s week
    [set(70.0, 3, false), set(80.0, 3, false), set(90.0, 3, true)],
    // 5/3/1 week
    [set(75.0, 5, false), set(85.0, 3, false), set(95.0, 1, true)],
];

static DELOAD_1: [SetTemplate; 3] = [set(40.0, 5, false), set(50.0, 5, false), set(60.0, 5, false)];
static DELOAD_2: [SetTemplate; 3] = [set(50.0, 5, false), set(60.0, 5, false), set(70.0, 5, false)];
static DELOAD_3: [SetTemplate; 3] = [set(65.0, 3, false), set(75.0, 3, false), set(85.0, 3, false)];
static DELOAD_4: [SetTemplate; 3] = [set(40.0, 10, false), set(50.0, 8, false), set(60.0, 6, false)];
static DELOAD_5: [SetTemplate; 3] = [set(50.0, 10, false), set(60.0, 8, false), set(70.0, 6, false)];

/// Working template for a zero-based week within a cycle (0..=2)
pub fn working_template(week_in_cycle: usize) -> &'static [SetTemplate] {
    &WORKING_SET_TEMPLATES[week_in_cycle % WORKING_SET_TEMPLATES.len()]
}

/// Template for a deload variant
pub fn deload_template(deload: DeloadType) -> &'static [SetTemplate] {
    match deload {
        DeloadType::Deload1 => &DELOAD_1,
        DeloadType::Deload2 => &DELOAD_2,
        DeloadType::Deload3 => &DELOAD_3,
        DeloadType::Deload4 => &DELOAD_4,
        DeloadType::Deload5 => &DELOAD_5,
    }
}
