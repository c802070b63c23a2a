//! World and per-species configuration.
//!
//! Defaults are the parameter set the engine was tuned with: a 50x50 world
//! where prey outnumber predators and predator visibility spans the grid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world dimensions must be at least 1x1, got {width}x{height}")]
    EmptyWorld { width: i32, height: i32 },
    #[error("{species} speed must be at least 1")]
    ZeroSpeed { species: &'static str },
    #[error("prey speed range is inverted: {min}..={max}")]
    InvertedSpeedRange { min: u64, max: u64 },
    #[error("{species} gestation chance {chance} is outside [0, 1]")]
    GestationChance { species: &'static str, chance: f64 },
    #[error("predator hunger thresholds are inverted: low {low} > high {high}")]
    InvertedHungerThresholds { low: u32, high: u32 },
    #[error("predator max hunger must be at least 1")]
    ZeroMaxHunger,
}

/// Prey species parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreyConfig {
    pub count: u32,
    /// Per-individual speed is randomized in `[speed_min, speed_max]`
    /// at creation (higher means slower: it is a tick interval).
    pub speed_min: u64,
    pub speed_max: u64,
    pub visibility: f64,
    pub gestation_chance: f64,
    pub gestation_active: bool,
    pub litter_size: u32,
    /// Initial age, also the age newborns are reset to.
    pub initial_age: u32,
}

impl Default for PreyConfig {
    fn default() -> Self {
        Self {
            count: 100,
            speed_min: 2,
            speed_max: 9,
            visibility: 10.0,
            gestation_chance: 0.0008,
            gestation_active: false,
            litter_size: 3,
            initial_age: 5000,
        }
    }
}

/// Predator species parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredatorConfig {
    pub count: u32,
    pub speed: u64,
    pub visibility: f64,
    pub gestation_chance: f64,
    pub gestation_active: bool,
    pub litter_size: u32,
    pub initial_age: u32,
    pub hunting: bool,
    pub initial_hunger: u32,
    pub hunger_low: u32,
    pub hunger_high: u32,
    pub kill_reward: u32,
    pub max_hunger: u32,
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self {
            count: 6,
            speed: 4,
            visibility: 100.0,
            gestation_chance: 0.0004,
            gestation_active: false,
            litter_size: 1,
            initial_age: 800,
            hunting: false,
            initial_hunger: 250,
            hunger_low: 350,
            hunger_high: 450,
            kill_reward: 150,
            max_hunger: 500,
        }
    }
}

/// Full world configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    pub prey: PreyConfig,
    pub predators: PredatorConfig,
}

impl WorldConfig {
    /// Reference configuration: 50x50 world with the default species mix.
    pub fn reference() -> Self {
        Self {
            width: 50,
            height: 50,
            prey: PreyConfig::default(),
            predators: PredatorConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 1 || self.height < 1 {
            return Err(ConfigError::EmptyWorld {
                width: self.width,
                height: self.height,
            });
        }
        if self.prey.speed_min == 0 {
            return Err(ConfigError::ZeroSpeed { species: "prey" });
        }
        if self.prey.speed_min > self.prey.speed_max {
            return Err(ConfigError::InvertedSpeedRange {
                min: self.prey.speed_min,
                max: self.prey.speed_max,
            });
        }
        if self.predators.speed == 0 {
            return Err(ConfigError::ZeroSpeed { species: "predator" });
        }
        if !(0.0..=1.0).contains(&self.prey.gestation_chance) {
            return Err(ConfigError::GestationChance {
                species: "prey",
                chance: self.prey.gestation_chance,
            });
        }
        if !(0.0..=1.0).contains(&self.predators.gestation_chance) {
            return Err(ConfigError::GestationChance {
                species: "predator",
                chance: self.predators.gestation_chance,
            });
        }
        if self.predators.hunger_low > self.predators.hunger_high {
            return Err(ConfigError::InvertedHungerThresholds {
                low: self.predators.hunger_low,
                high: self.predators.hunger_high,
            });
        }
        if self.predators.max_hunger == 0 {
            return Err(ConfigError::ZeroMaxHunger);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_config_is_valid() {
        assert_eq!(WorldConfig::reference().validate(), Ok(()));
    }

    #[test]
    fn test_empty_world_rejected() {
        let mut config = WorldConfig::reference();
        config.width = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyWorld {
                width: 0,
                height: 50
            })
        );
    }

    #[test]
    fn test_zero_speed_rejected() {
        let mut config = WorldConfig::reference();
        config.predators.speed = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroSpeed {
                species: "predator"
            })
        ));
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let mut config = WorldConfig::reference();
        config.prey.speed_min = 9;
        config.prey.speed_max = 2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedSpeedRange { min: 9, max: 2 })
        ));
    }

    #[test]
    fn test_gestation_chance_range_checked() {
        let mut config = WorldConfig::reference();
        config.prey.gestation_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GestationChance { species: "prey", .. })
        ));
    }
}
