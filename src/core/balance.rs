//! Progression and economy formulas shared by the engine and the simulator.
//!
//! All pure: numbers in, numbers out. Anything random lives in the caller.

use super::constants::*;
use crate::character::StatBlock;
use crate::items::Rarity;
use serde::{Deserialize, Serialize};

// =============================================================================
// LEVELING
// =============================================================================

/// Experience needed to advance from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    level.max(1) as u64 * LEVEL_EXP_MULTIPLIER
}

// =============================================================================
// POWER
// =============================================================================

/// Informal strength score used for previews and reports.
pub fn power_rating(stats: &StatBlock) -> f64 {
    2.0 * stats.attack as f64 + 1.5 * stats.defense as f64 + 0.1 * stats.health as f64
}

/// Naive odds of `player_power` beating `enemy_power`, clamped to [0.1, 0.9].
///
/// Display only. Arena outcomes are rolled in `arena::logic`.
pub fn win_probability(player_power: f64, enemy_power: f64) -> f64 {
    let total = player_power + enemy_power;
    if total <= 0.0 {
        return 0.5;
    }
    (player_power / total).clamp(WIN_PROBABILITY_FLOOR, WIN_PROBABILITY_CEILING)
}

// =============================================================================
// ARENA
// =============================================================================

/// Rank, honor and experience deltas for one arena battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaRewards {
    /// Signed honor delta; negative on a loss.
    pub honor: i64,
    /// Signed rank movement; positive means the rank number drops (improves).
    pub rank_change: i64,
    pub experience: u64,
}

/// Arena payout given both ranks.
///
/// The rank gap is `player_rank - opponent_rank`, so it is positive when the
/// opponent stands higher on the ladder. Beating a better-ranked opponent pays
/// more honor and climbs further, but never past the opponent's own rank.
pub fn arena_rewards(
    victory: bool,
    player_rank: u32,
    opponent_rank: u32,
    player_level: u32,
) -> ArenaRewards {
    let gap = player_rank as i64 - opponent_rank as i64;

    if victory {
        let honor = (ARENA_WIN_HONOR_BASE + gap.div_euclid(100)).max(ARENA_WIN_HONOR_MIN);
        let mut rank_change = gap.div_euclid(50).max(1);
        if gap > 0 {
            rank_change = rank_change.min(gap);
        }
        ArenaRewards {
            honor,
            rank_change,
            experience: 40 + 3 * player_level as u64,
        }
    } else {
        let honor = (ARENA_LOSS_HONOR_BASE + gap.div_euclid(200)).clamp(ARENA_LOSS_HONOR_MIN, 0);
        let regression = (1 + (-gap).div_euclid(100)).clamp(1, ARENA_MAX_RANK_REGRESSION);
        ArenaRewards {
            honor,
            rank_change: -regression,
            experience: 15 + player_level as u64,
        }
    }
}

// =============================================================================
// ITEMS
// =============================================================================

fn rarity_sell_multiplier(rarity: Rarity) -> f64 {
    match rarity {
        Rarity::Common => 0.3,
        Rarity::Rare => 0.4,
        Rarity::Epic => 0.5,
        Rarity::Legendary => 0.6,
    }
}

/// Gold an item would fetch from a vendor.
pub fn sell_value(base_value: u64, rarity: Rarity, enhance_level: u8) -> u64 {
    let enhance_factor = 1.0 + 0.1 * enhance_level as f64;
    (base_value as f64 * rarity_sell_multiplier(rarity) * enhance_factor).floor() as u64
}
