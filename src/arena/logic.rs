//! Opponent generation and battle resolution.

use super::types::{battle_power, ArenaOpponent, BattleResult, OPPONENT_NAMES};
use crate::character::{Hero, HeroClass, StatBlock};
use crate::core::balance::arena_rewards;
use crate::core::constants::*;
use crate::core::rng::RandomSource;

fn rank_bonus(rank: u32) -> f64 {
    ((ARENA_RANK_BONUS_CEILING - rank as f64) / ARENA_RANK_BONUS_CEILING).max(0.0)
        * ARENA_RANK_BONUS_MAX
}

/// Generate an opponent near the hero's rank and level.
///
/// Draw order: rank offset, level offset, class, name. Stats are the class
/// base grown 10% per level above 1, plus up to 50% for a high rank.
pub fn find_opponent(level: u32, rank: u32, rng: &mut dyn RandomSource) -> ArenaOpponent {
    let variance = match (rank as f64 * ARENA_RANK_VARIANCE).floor() as u32 {
        0 => ARENA_MIN_RANK_VARIANCE,
        v => v,
    };
    let offset = (rng.next_f64() - 0.5) * 2.0 * variance as f64;
    let opponent_rank = (rank as f64 + offset).floor().max(1.0) as u32;

    let opponent_level =
        (level as i64 + rng.int_between(-ARENA_LEVEL_VARIANCE, ARENA_LEVEL_VARIANCE)).max(1) as u32;
    let class = HeroClass::ALL[rng.pick_index(HeroClass::ALL.len())];
    let name = OPPONENT_NAMES[rng.pick_index(OPPONENT_NAMES.len())];

    let growth = 1.0 + ARENA_STAT_GROWTH_PER_LEVEL * (opponent_level - 1) as f64;
    let scale = growth * (1.0 + rank_bonus(opponent_rank));
    let base = class.base_stats();
    let scaled = |value: u32| (value as f64 * scale).floor() as u32;

    ArenaOpponent {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        class,
        level: opponent_level,
        rank: opponent_rank,
        stats: StatBlock::new(scaled(base.attack), scaled(base.defense), scaled(base.health)),
    }
}

/// Fight `opponent` and apply the outcome to the hero.
///
/// Both sides' power is scaled by an independent jitter in [0.8, 1.2],
/// player first. A tie goes to the opponent. Experience is granted win or
/// lose; rank and honor respect their floors.
pub fn resolve_battle(
    hero: &mut Hero,
    opponent: &ArenaOpponent,
    now_ms: i64,
    rng: &mut dyn RandomSource,
) -> BattleResult {
    let player_roll = battle_power(&hero.stats()) * rng.uniform(ARENA_JITTER_MIN, ARENA_JITTER_MAX);
    let opponent_roll = opponent.battle_power() * rng.uniform(ARENA_JITTER_MIN, ARENA_JITTER_MAX);
    let victory = player_roll > opponent_roll;

    let rewards = arena_rewards(victory, hero.arena_rank, opponent.rank, hero.level);
    let levels_gained = hero.gain_experience(rewards.experience, now_ms);
    hero.adjust_rank(rewards.rank_change);
    hero.adjust_honor(rewards.honor);

    BattleResult {
        victory,
        opponent_name: opponent.name.clone(),
        opponent_rank: opponent.rank,
        honor_gained: rewards.honor,
        rank_change: rewards.rank_change,
        experience_gained: rewards.experience,
        levels_gained,
        new_rank: hero.arena_rank,
        new_honor: hero.honor_points,
    }
}
