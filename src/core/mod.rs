//! Engine primitives: formulas, constants, errors, config, randomness and time.

pub mod balance;
pub mod combat_math;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod offline;
pub mod rng;
pub mod scheduler;

pub use config::{ConfigError, GameConfig, RewardScheme};
pub use error::{Entity, GameError, GameResult, Precondition, Resource};
pub use rng::{RandomSource, ScriptedRolls};
