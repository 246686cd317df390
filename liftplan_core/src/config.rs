//! Configuration file support for liftplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftplan/config.toml`.

use crate::engine::Strategy;
use crate::gear::{Bar, Gear, Plates, MENS_BAR_KG, MENS_BAR_LBS};
use crate::types::{DeloadType, Movement, StrategyType};
use crate::units::Unit;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub gear: GearConfig,

    #[serde(default)]
    pub plan: PlanConfig,

    #[serde(default)]
    pub movements: Vec<Movement>,
}

/// Equipment configuration
///
/// Bar and plates fall back to the men's bar and default plates of `unit`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GearConfig {
    #[serde(default = "default_unit")]
    pub unit: Unit,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar: Option<Bar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plates: Option<Plates>,
}

impl Default for GearConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            bar: None,
            plates: None,
        }
    }
}

impl GearConfig {
    pub fn to_gear(&self) -> Gear {
        let bar = self.bar.unwrap_or(match self.unit {
            Unit::Kg => MENS_BAR_KG,
            Unit::Lbs => MENS_BAR_LBS,
        });
        let plates = match &self.plates {
            Some(plates) => Plates::new(plates.weights.iter().copied(), plates.unit),
            None => Plates::default_for(self.unit),
        };
        Gear {
            bar,
            plates,
            unit: self.unit,
        }
    }
}

/// Programming choices
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanConfig {
    #[serde(default)]
    pub strategy: StrategyType,

    #[serde(default)]
    pub deload: DeloadType,

    #[serde(default = "default_true")]
    pub warmup: bool,

    #[serde(default = "default_true")]
    pub joker_sets: bool,

    #[serde(default)]
    pub recommend_plates: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyType::default(),
            deload: DeloadType::default(),
            warmup: true,
            joker_sets: true,
            recommend_plates: false,
        }
    }
}

// Default value functions
fn default_unit() -> Unit {
    Unit::Lbs
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Starter configuration with the four main lifts
    pub fn example() -> Self {
        let movements = [
            ("deadlift", 315.0),
            ("bench press", 185.0),
            ("overhead press", 115.0),
            ("back squat", 275.0),
        ]
        .into_iter()
        .map(|(name, tm)| Movement::new(name, tm, Unit::Lbs))
        .collect();

        Self {
            movements,
            ..Self::default()
        }
    }

    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| Error::Config("unable to determine config directory".into()))?;
        Ok(base.join("liftplan").join("config.toml"))
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    ///
    /// Writes to a temporary file next to `path` and renames it into place.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Build the engine request described by this configuration
    pub fn strategy(&self) -> Result<Strategy> {
        if self.movements.is_empty() {
            return Err(Error::Config(
                "no movements configured; add [[movements]] entries".into(),
            ));
        }

        let strategy = Strategy {
            movements: self.movements.clone(),
            gear: self.gear.to_gear(),
            strategy_type: self.plan.strategy,
            deload: self.plan.deload,
            warmup: self.plan.warmup,
            joker_sets: self.plan.joker_sets,
            recommend_plates: self.plan.recommend_plates,
        };
        strategy.validate()?;
        Ok(strategy)
    }
}
