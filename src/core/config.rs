//! Tunable engine settings, optionally loaded from TOML.
//!
//! Formula constants stay in `constants`; this covers timings, multipliers and
//! starting resources a host may want to change without a rebuild.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Which idle enemy reward table the loop uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardScheme {
    /// Flat 10 gold / 10 experience per kill.
    #[default]
    Flat,
    /// Gold and experience scale with enemy level and archetype.
    LevelScaled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub combat_interval_ms: u64,
    pub recovery_delay_ms: u64,
    pub arena_resolution_delay_ms: u64,
    pub housekeeping_interval_ms: u64,
    pub ad_bonus_delay_ms: u64,
    pub ad_bonus_multiplier: f64,
    pub min_offline_seconds: i64,
    pub combat_log_capacity: usize,
    pub starting_gold: u64,
    pub starting_arena_rank: u32,
    pub idle_rewards: RewardScheme,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            combat_interval_ms: COMBAT_INTERVAL_MS,
            recovery_delay_ms: RECOVERY_DELAY_MS,
            arena_resolution_delay_ms: ARENA_RESOLUTION_DELAY_MS,
            housekeeping_interval_ms: HOUSEKEEPING_INTERVAL_MS,
            ad_bonus_delay_ms: AD_BONUS_DELAY_MS,
            ad_bonus_multiplier: AD_BONUS_MULTIPLIER,
            min_offline_seconds: MIN_OFFLINE_SECONDS,
            combat_log_capacity: COMBAT_LOG_CAPACITY,
            starting_gold: STARTING_GOLD,
            starting_arena_rank: STARTING_ARENA_RANK,
            idle_rewards: RewardScheme::Flat,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combat_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "combat_interval_ms must be positive".to_string(),
            ));
        }
        if self.housekeeping_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "housekeeping_interval_ms must be positive".to_string(),
            ));
        }
        if self.combat_log_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "combat_log_capacity must be at least 1".to_string(),
            ));
        }
        if self.ad_bonus_multiplier < 1.0 {
            return Err(ConfigError::ValidationError(format!(
                "ad_bonus_multiplier must be >= 1.0, got {}",
                self.ad_bonus_multiplier
            )));
        }
        if self.starting_arena_rank == 0 {
            return Err(ConfigError::ValidationError(
                "starting_arena_rank must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
