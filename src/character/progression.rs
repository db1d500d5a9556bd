//! Atomic hero mutations: experience, currency, health and stat totals.
//!
//! Each operation checks everything it needs before touching the hero.

use super::hero::{Hero, StatBlock};
use crate::core::balance::xp_for_next_level;
use crate::core::constants::*;
use crate::core::error::{GameError, GameResult, Resource};

/// Add experience and resolve every level threshold it crosses.
///
/// Each level gained grants one skill point and +3 attack, +2 defense and
/// +10 health to the base line. Any level gained fully heals the hero.
///
/// # Returns
/// Number of levels gained
pub fn level_up(hero: &mut Hero, experience: u64) -> u32 {
    hero.experience = hero.experience.saturating_add(experience);
    let mut levels_gained = 0;

    while hero.experience >= hero.experience_to_next {
        hero.experience -= hero.experience_to_next;
        hero.level += 1;
        hero.skill_points += 1;
        hero.experience_to_next = xp_for_next_level(hero.level);
        levels_gained += 1;
    }

    if levels_gained > 0 {
        let growth = StatBlock::new(
            LEVEL_UP_ATTACK * levels_gained,
            LEVEL_UP_DEFENSE * levels_gained,
            LEVEL_UP_HEALTH * levels_gained,
        );
        hero.base_stats = hero.base_stats.saturating_add(growth);
        hero.recalculate_stats();
        hero.current_health = hero.max_health;
    }

    levels_gained
}

impl Hero {
    /// Grant experience, stamping activity. Returns levels gained.
    pub fn gain_experience(&mut self, amount: u64, now_ms: i64) -> u32 {
        self.last_active = now_ms;
        level_up(self, amount)
    }

    pub fn gain_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Deduct gold. Returns false and changes nothing when short.
    pub fn spend_gold(&mut self, amount: u64) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Deduct gold or report the shortfall.
    pub fn try_spend_gold(&mut self, amount: u64) -> GameResult<()> {
        if self.spend_gold(amount) {
            Ok(())
        } else {
            Err(GameError::insufficient(Resource::Gold, amount, self.gold))
        }
    }

    pub fn gain_honor(&mut self, amount: u64) {
        self.honor_points = self.honor_points.saturating_add(amount);
    }

    /// Deduct honor. Returns false and changes nothing when short.
    pub fn spend_honor(&mut self, amount: u64) -> bool {
        if self.honor_points < amount {
            return false;
        }
        self.honor_points -= amount;
        true
    }

    /// Apply a signed honor delta, flooring at zero.
    pub fn adjust_honor(&mut self, delta: i64) {
        if delta >= 0 {
            self.gain_honor(delta as u64);
        } else {
            self.honor_points = self.honor_points.saturating_sub(delta.unsigned_abs());
        }
    }

    /// Move the arena rank by `improvement` places (positive climbs toward 1).
    pub fn adjust_rank(&mut self, improvement: i64) {
        let next = self.arena_rank as i64 - improvement;
        self.arena_rank = next.clamp(1, u32::MAX as i64) as u32;
    }

    /// Lose health, stopping at zero. Death handling belongs to the caller.
    pub fn take_damage(&mut self, amount: u32) {
        self.current_health = self.current_health.saturating_sub(amount);
    }

    /// Restore `amount` health, or everything when `None`.
    pub fn heal(&mut self, amount: Option<u32>) {
        self.current_health = match amount {
            Some(amount) => self.current_health.saturating_add(amount).min(self.max_health),
            None => self.max_health,
        };
    }

    /// Rebuild totals as base stats plus every equipped bonus, clamping
    /// current health to the new maximum.
    pub fn recalculate_stats(&mut self) {
        let totals = self.base_stats.saturating_add(self.equipped.total_bonus());
        self.attack = totals.attack;
        self.defense = totals.defense;
        self.max_health = totals.health;
        self.current_health = self.current_health.min(self.max_health);
    }
}
