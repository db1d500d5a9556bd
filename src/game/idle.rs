//! Idle combat driven by the scheduler.

use super::{Game, GameEvent, Task};
use crate::combat::{resolve_round, Enemy, IdleSession, PendingRewards};
use crate::core::constants::MS_PER_SECOND;
use crate::core::error::{GameResult, Precondition};
use log::{debug, info};

impl Game {
    fn schedule_idle_tick(&mut self, hero_id: &str, epoch: u64) {
        let handle = self.scheduler.schedule_in(
            self.config.combat_interval_ms,
            Task::IdleTick {
                hero_id: hero_id.to_string(),
                epoch,
            },
        );
        if let Some(stale) = self.idle_ticks.insert(hero_id.to_string(), handle) {
            self.scheduler.cancel(stale);
        }
    }

    /// Start idle combat against a freshly generated enemy.
    pub fn start_idle(&mut self, hero_id: &str) -> GameResult<Enemy> {
        let now = self.now();
        let scheme = self.config.idle_rewards;
        let capacity = self.config.combat_log_capacity;
        let recovery_ms = self.config.recovery_delay_ms;

        let hero = self.registry.require(hero_id)?;
        let session = self
            .sessions
            .entry(hero_id.to_string())
            .or_insert_with(|| IdleSession::new(capacity).with_recovery_delay(recovery_ms));

        // A hero stored at 0 health never went through a defeat here, so
        // nothing would ever heal it.
        if !hero.is_alive() && !session.is_recovering() {
            let recovers_at = session.begin_recovery(now);
            info!("{} is down; recovering at {}", hero.name, recovers_at);
            self.scheduler.schedule_at(
                recovers_at,
                Task::Recovery {
                    hero_id: hero_id.to_string(),
                },
            );
            return Err(Precondition::HeroRecovering.into());
        }
        let enemy = session.start(hero, scheme, now, &mut *self.rng)?.clone();
        let epoch = session.epoch;
        info!("{} started idle combat against {}", hero.name, enemy.name);

        self.schedule_idle_tick(hero_id, epoch);
        Ok(enemy)
    }

    /// Stop idle combat. Returns false when there was nothing to stop.
    pub fn stop_idle(&mut self, hero_id: &str) -> GameResult<bool> {
        self.registry.require(hero_id)?;
        let now = self.now();
        let stopped = self
            .sessions
            .get_mut(hero_id)
            .is_some_and(|session| session.stop(now));
        if let Some(handle) = self.idle_ticks.remove(hero_id) {
            self.scheduler.cancel(handle);
        }
        if stopped {
            info!("hero {} stopped idle combat", hero_id);
        }
        Ok(stopped)
    }

    /// Take the pending reward tally. Empty when nothing was earned.
    pub fn collect_idle_rewards(&mut self, hero_id: &str) -> GameResult<PendingRewards> {
        self.registry.require(hero_id)?;
        let now = self.now();
        let collected = self
            .sessions
            .get_mut(hero_id)
            .map(|session| session.collect(now))
            .unwrap_or_default();
        if !collected.is_empty() {
            debug!(
                "hero {} collected {} gold, {} exp",
                hero_id, collected.gold, collected.experience
            );
        }
        Ok(collected)
    }

    pub fn idle_session(&self, hero_id: &str) -> Option<&IdleSession> {
        self.sessions.get(hero_id)
    }

    pub(super) fn run_idle_tick(&mut self, hero_id: &str, epoch: u64, events: &mut Vec<GameEvent>) {
        let now = self.now();
        let scheme = self.config.idle_rewards;
        let tick_seconds = self.config.combat_interval_ms / MS_PER_SECOND as u64;

        let Some(session) = self.sessions.get_mut(hero_id) else {
            return;
        };
        if !session.accepts_tick(epoch) {
            debug!("dropping stale idle tick for {} (epoch {})", hero_id, epoch);
            return;
        }
        self.idle_ticks.remove(hero_id);
        let Ok(hero) = self.registry.require_mut(hero_id) else {
            return;
        };

        session.record_idle_time(hero, tick_seconds);
        let enemy_name = session
            .enemy
            .as_ref()
            .map(|enemy| enemy.name.clone())
            .unwrap_or_default();
        let Some(outcome) = resolve_round(hero, session, scheme, now, &mut *self.rng) else {
            return;
        };

        if outcome.levels_gained > 0 {
            info!("{} reached level {}", hero.name, hero.level);
            events.push(GameEvent::LevelUp {
                hero_id: hero_id.to_string(),
                new_level: hero.level,
                levels_gained: outcome.levels_gained,
            });
        }

        let hero_defeated = outcome.hero_defeated;
        let next_epoch = session.epoch;
        let recovers_at = session.recovering_until;
        events.push(GameEvent::IdleRound {
            hero_id: hero_id.to_string(),
            enemy_name: enemy_name.clone(),
            outcome,
        });

        if hero_defeated {
            let recovers_at = recovers_at.unwrap_or(now);
            info!("{} was defeated by {}", hero.name, enemy_name);
            self.scheduler.schedule_at(
                recovers_at,
                Task::Recovery {
                    hero_id: hero_id.to_string(),
                },
            );
            events.push(GameEvent::HeroDefeated {
                hero_id: hero_id.to_string(),
                enemy_name,
                recovers_at,
            });
        } else {
            self.schedule_idle_tick(hero_id, next_epoch);
        }
    }

    pub(super) fn run_recovery(&mut self, hero_id: &str, events: &mut Vec<GameEvent>) {
        let now = self.now();
        let (Some(session), Ok(hero)) = (
            self.sessions.get_mut(hero_id),
            self.registry.require_mut(hero_id),
        ) else {
            return;
        };
        session.finish_recovery(hero, now);
        info!("{} recovered", hero.name);
        events.push(GameEvent::HeroRecovered {
            hero_id: hero_id.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{HeroClass, HeroPatch};
    use crate::core::config::GameConfig;
    use crate::core::error::GameError;
    use crate::core::rng::ScriptedRolls;

    fn game_with_hero() -> (Game, String) {
        let mut game = Game::with_rng(GameConfig::default(), 0, ScriptedRolls::new([]));
        let hero = game.create_hero("Aria", HeroClass::Warrior).unwrap();
        (game, hero.id)
    }

    #[test]
    fn test_start_schedules_one_tick() {
        let (mut game, id) = game_with_hero();
        game.start_idle(&id).unwrap();
        // housekeeping plus one idle tick
        assert_eq!(game.pending_tasks(), 2);
        assert_eq!(game.next_due(), Some(3_000));

        let err = game.start_idle(&id).unwrap_err();
        assert_eq!(err, GameError::from(Precondition::IdleCombatActive));
        assert_eq!(game.pending_tasks(), 2);
    }

    #[test]
    fn test_ticks_run_every_interval() {
        let (mut game, id) = game_with_hero();
        game.start_idle(&id).unwrap();
        let events = game.advance(9_000);
        let rounds = events
            .iter()
            .filter(|e| matches!(e, GameEvent::IdleRound { .. }))
            .count();
        assert_eq!(rounds, 3);
        assert_eq!(game.idle_session(&id).unwrap().stats.total_idle_seconds, 9);
        assert_eq!(game.pending_tasks(), 2);
    }

    #[test]
    fn test_stop_cancels_tick() {
        let (mut game, id) = game_with_hero();
        game.start_idle(&id).unwrap();
        assert!(game.stop_idle(&id).unwrap());
        assert_eq!(game.pending_tasks(), 1);
        assert!(game.advance(10_000).iter().all(|e| e.hero_id().is_none()));
        assert!(!game.stop_idle(&id).unwrap());
    }

    #[test]
    fn test_downed_hero_recovers_before_fighting() {
        let (mut game, id) = game_with_hero();
        let patch = HeroPatch {
            current_health: Some(0),
            ..HeroPatch::default()
        };
        game.update_hero(&id, &patch).unwrap();

        let err = game.start_idle(&id).unwrap_err();
        assert_eq!(err, GameError::from(Precondition::HeroRecovering));
        assert_eq!(game.next_due(), Some(5_000));
        // asking again does not queue a second recovery
        assert!(game.start_idle(&id).is_err());
        assert_eq!(game.pending_tasks(), 2);

        let events = game.advance(5_000);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::HeroRecovered { .. })));
        let hero = game.hero(&id).unwrap();
        assert_eq!(hero.current_health, hero.max_health);
        assert!(game.start_idle(&id).is_ok());
    }

    #[test]
    fn test_collect_without_session_is_empty() {
        let (mut game, id) = game_with_hero();
        assert!(game.collect_idle_rewards(&id).unwrap().is_empty());
        assert!(game.collect_idle_rewards("ghost").is_err());
    }
}
