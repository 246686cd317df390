//! Error types for the liftplan_core library.

use crate::types::SetType;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for liftplan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A unit outside of KG/LBS was supplied
    #[error("invalid unit: {0}")]
    InvalidUnit(String),

    /// Non-positive (or non-finite) weight for a bar or training max
    #[error("invalid weight: {0}")]
    InvalidWeight(f64),

    /// Plate set is empty where a minimum or recommendation is required
    #[error("no plates found")]
    NoPlatesFound,

    /// Requested weight is lighter than the empty bar
    #[error("input weight {weight} is less than the minimum weight of the bar ({bar})")]
    InputLessThanBar { weight: f64, bar: f64 },

    /// Session mutator could not find a set of the required type
    #[error("no set found matching: {0}")]
    SetTypeNotFound(SetType),

    /// Unrecognised auxiliary strategy selector
    #[error("strategy type not implemented: {0}")]
    StrategyNotImplemented(String),

    /// Unrecognised set type string
    #[error("invalid SetType: {0}")]
    InvalidSetType(String),

    /// Unrecognised deload template string
    #[error("invalid DeloadType: {0}")]
    InvalidDeloadType(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
