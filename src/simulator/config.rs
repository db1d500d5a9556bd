//! Simulation configuration.

use crate::character::HeroClass;
use crate::core::config::GameConfig;

/// Configuration for a batch of simulated playthroughs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent runs
    pub num_runs: u32,

    /// Base random seed; run `i` uses `seed + i` (None = entropy)
    pub seed: Option<u64>,

    /// Simulated play time per run
    pub hours: u32,

    pub class: HeroClass,

    /// Queue recipes, equip the results and enhance gear
    pub simulate_crafting: bool,

    /// Minutes between arena battles (0 = no arena)
    pub arena_every_minutes: u32,

    /// Engine settings shared by every run
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 20,
            seed: None,
            hours: 8,
            class: HeroClass::Warrior,
            simulate_crafting: true,
            arena_every_minutes: 10,
            game: GameConfig::default(),
        }
    }
}

impl SimConfig {
    /// A single short run, for smoke checks.
    pub fn quick() -> Self {
        Self {
            num_runs: 1,
            hours: 1,
            ..Default::default()
        }
    }

    /// Idle combat only: no crafting, no arena.
    pub fn idle_only(hours: u32) -> Self {
        Self {
            hours,
            simulate_crafting: false,
            arena_every_minutes: 0,
            ..Default::default()
        }
    }
}
