//! Offline progression.
//!
//! Rewards for time spent away, capped at an 8 hour window with diminishing
//! efficiency after the first two hours. Gold and experience are
//! deterministic for a given duration and level; materials are rolled.

use super::constants::*;
use super::error::{GameError, GameResult, Precondition};
use super::rng::RandomSource;
use crate::character::Hero;
use crate::items::{MaterialKind, Materials};
use serde::{Deserialize, Serialize};

/// Rewards computed for one absence, before any bonus multiplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfflineRewards {
    /// Seconds of absence actually credited (already capped).
    pub offline_seconds: i64,
    pub gold: u64,
    pub experience: u64,
    pub materials: Materials,
}

/// (kind, base chance, quantity units per hour)
const OFFLINE_MATERIAL_TABLE: [(MaterialKind, f64, f64); 5] = [
    (MaterialKind::IronOre, 0.4, 2.0),
    (MaterialKind::Leather, 0.4, 2.0),
    (MaterialKind::Cloth, 0.4, 2.0),
    (MaterialKind::Wood, 0.4, 2.0),
    (MaterialKind::Crystals, 0.2, 1.0),
];

/// Whole seconds between `last_active_ms` and `now_ms`. Clock skew counts as zero.
pub fn elapsed_offline_seconds(now_ms: i64, last_active_ms: i64) -> i64 {
    ((now_ms - last_active_ms) / MS_PER_SECOND).max(0)
}

/// Efficiency multiplier for an absence of `hours`.
pub fn offline_efficiency(hours: f64) -> f64 {
    let decay = (hours - OFFLINE_FULL_EFFICIENCY_HOURS).max(0.0) * OFFLINE_EFFICIENCY_DECAY_PER_HOUR;
    (1.0 - decay).max(OFFLINE_EFFICIENCY_FLOOR)
}

fn capped_hours(offline_seconds: i64) -> f64 {
    offline_seconds.clamp(0, MAX_OFFLINE_SECONDS) as f64 / 3_600.0
}

/// Hours actually paid out after efficiency.
///
/// `hours * efficiency` peaks at `OFFLINE_PEAK_HOURS`; past that point the
/// payout holds flat so a longer absence never earns less.
fn paid_hours(hours: f64) -> f64 {
    let hours = hours.min(OFFLINE_PEAK_HOURS);
    hours * offline_efficiency(hours)
}

/// Deterministic gold and experience for an absence.
pub fn offline_gold_and_experience(offline_seconds: i64, level: u32) -> (u64, u64) {
    let paid = paid_hours(capped_hours(offline_seconds));
    let level = level as u64;
    let gold_per_hour = (OFFLINE_GOLD_PER_HOUR.0 + OFFLINE_GOLD_PER_HOUR.1 * level) as f64;
    let exp_per_hour = (OFFLINE_EXP_PER_HOUR.0 + OFFLINE_EXP_PER_HOUR.1 * level) as f64;
    (
        (gold_per_hour * paid).floor() as u64,
        (exp_per_hour * paid).floor() as u64,
    )
}

fn material_chance(base: f64, hours: f64) -> f64 {
    (base + hours * OFFLINE_MATERIAL_CHANCE_PER_HOUR).min(OFFLINE_MATERIAL_CHANCE_CAP)
}

fn material_ceiling(units_per_hour: f64, hours: f64) -> f64 {
    (hours * units_per_hour).max(1.0)
}

/// Full reward roll for an absence. Each material kind draws a chance roll
/// and, on a hit, a quantity roll.
pub fn calculate_offline_rewards(
    offline_seconds: i64,
    level: u32,
    rng: &mut dyn RandomSource,
) -> OfflineRewards {
    let credited = offline_seconds.clamp(0, MAX_OFFLINE_SECONDS);
    let hours = capped_hours(credited);
    let (gold, experience) = offline_gold_and_experience(credited, level);

    let mut materials = Materials::new();
    for (kind, base, units) in OFFLINE_MATERIAL_TABLE {
        if rng.chance(material_chance(base, hours)) {
            let quantity = (rng.next_f64() * material_ceiling(units, hours)).floor() as u32 + 1;
            materials.add(kind, quantity);
        }
    }

    OfflineRewards {
        offline_seconds: credited,
        gold,
        experience,
        materials,
    }
}

/// Reject a claimed reward bundle that could not have come from
/// `calculate_offline_rewards` for a hero of `level`.
pub fn validate_claim(rewards: &OfflineRewards, level: u32) -> GameResult<()> {
    if rewards.offline_seconds < 0 {
        return Err(GameError::InvalidArgument(
            "offline time cannot be negative".to_string(),
        ));
    }
    if rewards.offline_seconds > MAX_OFFLINE_SECONDS {
        return Err(Precondition::OfflineWindowExceeded {
            seconds: rewards.offline_seconds,
            max_seconds: MAX_OFFLINE_SECONDS,
        }
        .into());
    }

    let (max_gold, max_experience) = offline_gold_and_experience(rewards.offline_seconds, level);
    if rewards.gold > max_gold {
        return Err(GameError::InvalidArgument(format!(
            "offline gold {} exceeds the {} earnable in {} s",
            rewards.gold, max_gold, rewards.offline_seconds
        )));
    }
    if rewards.experience > max_experience {
        return Err(GameError::InvalidArgument(format!(
            "offline experience {} exceeds the {} earnable in {} s",
            rewards.experience, max_experience, rewards.offline_seconds
        )));
    }

    let hours = capped_hours(rewards.offline_seconds);
    for (kind, quantity) in rewards.materials.iter() {
        let Some((_, _, units)) = OFFLINE_MATERIAL_TABLE.iter().find(|(k, _, _)| *k == kind) else {
            return Err(GameError::InvalidArgument(format!(
                "{} is never found offline",
                kind.name()
            )));
        };
        let max_quantity = material_ceiling(*units, hours).floor() as u32 + 1;
        if quantity > max_quantity {
            return Err(GameError::InvalidArgument(format!(
                "offline {} {} exceeds the maximum of {}",
                kind.name(),
                quantity,
                max_quantity
            )));
        }
    }
    Ok(())
}

/// What a claim actually granted, after any multiplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfflineClaim {
    pub gold_gained: u64,
    pub experience_gained: u64,
    pub materials: Materials,
    pub bonus_applied: bool,
    pub levels_gained: u32,
}

/// Validate `rewards` for the hero, then grant them scaled by `multiplier`
/// and mark the hero active at `now_ms`.
pub fn apply_offline_claim(
    hero: &mut Hero,
    rewards: &OfflineRewards,
    multiplier: f64,
    now_ms: i64,
) -> GameResult<OfflineClaim> {
    validate_claim(rewards, hero.level)?;

    let gold = (rewards.gold as f64 * multiplier).floor() as u64;
    let experience = (rewards.experience as f64 * multiplier).floor() as u64;
    let materials = rewards.materials.scaled(multiplier);

    hero.gain_gold(gold);
    let levels_gained = hero.gain_experience(experience, now_ms);
    hero.materials.merge(&materials);
    hero.last_active = now_ms;

    Ok(OfflineClaim {
        gold_gained: gold,
        experience_gained: experience,
        materials,
        bonus_applied: multiplier > 1.0,
        levels_gained,
    })
}
