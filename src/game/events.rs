//! Events produced while the engine advances time.
//!
//! Scheduled work runs inside `Game::advance`, so its results come back as
//! events instead of return values. A host maps them to UI updates.

use crate::arena::BattleResult;
use crate::combat::RoundOutcome;
use crate::core::error::GameError;
use crate::core::offline::OfflineClaim;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    // ── Idle combat ─────────────────────────────────────────────
    /// One idle round was played.
    IdleRound {
        hero_id: String,
        enemy_name: String,
        outcome: RoundOutcome,
    },

    /// The hero gained one or more levels from idle kills.
    LevelUp {
        hero_id: String,
        new_level: u32,
        levels_gained: u32,
    },

    /// The hero fell; idle combat stopped and recovery is scheduled.
    HeroDefeated {
        hero_id: String,
        enemy_name: String,
        recovers_at: i64,
    },

    /// Recovery finished with a full heal. Idle combat does not restart.
    HeroRecovered { hero_id: String },

    // ── Arena ───────────────────────────────────────────────────
    ArenaBattleResolved {
        hero_id: String,
        result: BattleResult,
    },

    // ── Offline ─────────────────────────────────────────────────
    /// The stubbed ad finished and the doubled claim was applied.
    AdBonusClaimed { hero_id: String, claim: OfflineClaim },

    /// The ad finished but the claim no longer validated.
    AdBonusRejected {
        hero_id: String,
        #[serde(skip)]
        error: GameError,
        reason: String,
    },

    // ── Housekeeping ────────────────────────────────────────────
    LeaderboardRebuilt { entries: usize },
}

impl GameEvent {
    /// The hero this event concerns, if any.
    pub fn hero_id(&self) -> Option<&str> {
        match self {
            GameEvent::IdleRound { hero_id, .. }
            | GameEvent::LevelUp { hero_id, .. }
            | GameEvent::HeroDefeated { hero_id, .. }
            | GameEvent::HeroRecovered { hero_id }
            | GameEvent::ArenaBattleResolved { hero_id, .. }
            | GameEvent::AdBonusClaimed { hero_id, .. }
            | GameEvent::AdBonusRejected { hero_id, .. } => Some(hero_id),
            GameEvent::LeaderboardRebuilt { .. } => None,
        }
    }
}
