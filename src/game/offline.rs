//! Offline rewards and the ad-bonus claim.

use super::{Game, GameEvent, Task};
use crate::core::error::{GameResult, Precondition};
use crate::core::offline::{
    apply_offline_claim, calculate_offline_rewards, elapsed_offline_seconds, validate_claim,
    OfflineClaim, OfflineRewards,
};
use log::{info, warn};

impl Game {
    /// Rewards for the time since `last_active_ms`, or `None` when the
    /// absence is too short to count. Nothing is granted until claimed.
    pub fn calculate_offline(
        &mut self,
        hero_id: &str,
        last_active_ms: i64,
    ) -> GameResult<Option<OfflineRewards>> {
        let hero = self.registry.require(hero_id)?;
        let seconds = elapsed_offline_seconds(self.scheduler.now(), last_active_ms);
        if seconds < self.config.min_offline_seconds {
            return Ok(None);
        }
        let rewards = calculate_offline_rewards(seconds, hero.level, &mut *self.rng);
        info!(
            "{} was away {} s: {} gold, {} exp available",
            hero.name, rewards.offline_seconds, rewards.gold, rewards.experience
        );
        Ok(Some(rewards))
    }

    /// Grant offline rewards now, doubled when `use_bonus` is set.
    pub fn claim_offline(
        &mut self,
        hero_id: &str,
        rewards: &OfflineRewards,
        use_bonus: bool,
    ) -> GameResult<OfflineClaim> {
        let now = self.now();
        let multiplier = if use_bonus {
            self.config.ad_bonus_multiplier
        } else {
            1.0
        };
        let hero = self.registry.require_mut(hero_id)?;
        let claim = apply_offline_claim(hero, rewards, multiplier, now)?;
        info!(
            "{} claimed {} gold, {} exp{}",
            hero.name,
            claim.gold_gained,
            claim.experience_gained,
            if claim.bonus_applied { " (bonus)" } else { "" }
        );
        Ok(claim)
    }

    /// Start the stubbed ad. The bonus claim is applied when it finishes and
    /// reported as [`GameEvent::AdBonusClaimed`]. One claim per hero at a time.
    pub fn watch_ad_for_bonus(&mut self, hero_id: &str, rewards: OfflineRewards) -> GameResult<()> {
        let hero = self.registry.require(hero_id)?;
        validate_claim(&rewards, hero.level)?;
        if self.ad_claims.contains_key(hero_id) {
            return Err(Precondition::AdBonusPending.into());
        }
        self.ad_claims.insert(hero_id.to_string(), rewards);
        self.scheduler.schedule_in(
            self.config.ad_bonus_delay_ms,
            Task::AdBonusClaim {
                hero_id: hero_id.to_string(),
            },
        );
        Ok(())
    }

    pub fn ad_bonus_pending(&self, hero_id: &str) -> bool {
        self.ad_claims.contains_key(hero_id)
    }

    pub(super) fn run_ad_bonus_claim(&mut self, hero_id: &str, events: &mut Vec<GameEvent>) {
        let Some(rewards) = self.ad_claims.remove(hero_id) else {
            return;
        };
        match self.claim_offline(hero_id, &rewards, true) {
            Ok(claim) => events.push(GameEvent::AdBonusClaimed {
                hero_id: hero_id.to_string(),
                claim,
            }),
            Err(error) => {
                warn!("ad bonus for {} rejected: {}", hero_id, error);
                events.push(GameEvent::AdBonusRejected {
                    hero_id: hero_id.to_string(),
                    reason: error.to_string(),
                    error,
                });
            }
        }
    }
}
