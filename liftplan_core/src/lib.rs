#![forbid(unsafe_code)]

//! Core domain model and calculation engine for liftplan.
//!
//! This crate provides:
//! - Units and barbell/plate equipment (rounding, plate recommendations)
//! - Domain types (movements, sets, sessions, weeks, progressions)
//! - 5/3/1 templates and progression generation
//! - Session policies (warm-ups, jokers, first set last)
//! - The concurrent calculation engine
//! - Configuration and logging setup

pub mod units;
pub mod error;
pub mod gear;
pub mod types;
pub mod templates;
pub mod session;
pub mod config;
pub mod logging;
pub mod progression;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use units::{convert_from_to, Unit};
pub use gear::{recommend, Bar, Gear, Plates};
pub use types::*;
pub use config::Config;
pub use progression::new_progression;
pub use engine::{CalculateOptions, Strategy};
