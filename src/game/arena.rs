//! Arena flow: find an opponent, start a battle, resolve it after a delay.

use super::{Game, GameEvent, Task};
use crate::arena::{self, ArenaOpponent, BattleResult, LeaderboardEntry, PendingBattle};
use crate::core::error::{Entity, GameError, GameResult, Precondition};
use log::{debug, info, warn};

impl Game {
    /// Generate an opponent near the hero's rank and remember it for
    /// `start_battle`. A new search replaces the previous opponent.
    pub fn find_opponent(&mut self, hero_id: &str) -> GameResult<ArenaOpponent> {
        let hero = self.registry.require(hero_id)?;
        let state = self.arena.entry(hero_id.to_string()).or_default();
        if state.battle_in_progress() {
            return Err(Precondition::BattleInProgress.into());
        }
        let opponent = arena::find_opponent(hero.level, hero.arena_rank, &mut *self.rng);
        state.opponent = Some(opponent.clone());
        Ok(opponent)
    }

    /// Lock in a fight against the last opponent found. The result arrives
    /// as [`GameEvent::ArenaBattleResolved`] once the resolution delay passes.
    pub fn start_battle(&mut self, hero_id: &str, opponent_id: &str) -> GameResult<PendingBattle> {
        let hero = self.registry.require(hero_id)?;
        let hero_name = hero.name.clone();
        let hero_stats = hero.stats();
        let now = self.now();
        let delay = self.config.arena_resolution_delay_ms;

        let state = self.arena.entry(hero_id.to_string()).or_default();
        if state.battle_in_progress() {
            return Err(Precondition::BattleInProgress.into());
        }
        let Some(opponent) = state.opponent.as_ref() else {
            return Err(Precondition::NoOpponent.into());
        };
        if opponent.id != opponent_id {
            return Err(GameError::not_found(Entity::Opponent, opponent_id));
        }

        let battle = PendingBattle {
            hero_id: hero_id.to_string(),
            opponent: opponent.clone(),
            win_chance: opponent.preview_win_probability(&hero_stats),
            started_at: now,
            resolves_at: now + delay as i64,
        };
        state.opponent = None;
        state.battle = Some(battle.clone());
        debug!(
            "{} challenges {} at {:.0}% odds",
            hero_name,
            battle.opponent.name,
            battle.win_chance * 100.0
        );

        self.scheduler.schedule_in(
            delay,
            Task::ArenaResolve {
                hero_id: hero_id.to_string(),
            },
        );
        Ok(battle)
    }

    pub fn last_battle_result(&self, hero_id: &str) -> Option<&BattleResult> {
        self.arena.get(hero_id)?.last_result.as_ref()
    }

    pub fn battle_in_progress(&self, hero_id: &str) -> bool {
        self.arena
            .get(hero_id)
            .is_some_and(|state| state.battle_in_progress())
    }

    /// The current ladder, built first if it has never been built.
    pub fn leaderboard(&mut self) -> Vec<LeaderboardEntry> {
        if self.board.is_empty() {
            let now = self.now();
            self.board.rebuild(self.registry.iter(), now, &mut *self.rng);
        }
        self.board.entries().to_vec()
    }

    pub(super) fn run_arena_resolve(&mut self, hero_id: &str, events: &mut Vec<GameEvent>) {
        let now = self.now();
        let Some(battle) = self
            .arena
            .get_mut(hero_id)
            .and_then(|state| state.battle.take())
        else {
            return;
        };
        let Ok(hero) = self.registry.require_mut(hero_id) else {
            warn!("arena battle for missing hero {}", hero_id);
            return;
        };

        let result = arena::resolve_battle(hero, &battle.opponent, now, &mut *self.rng);
        info!(
            "{} {} against {} (now rank {}, honor {:+})",
            hero.name,
            if result.victory { "won" } else { "lost" },
            result.opponent_name,
            result.new_rank,
            result.honor_gained
        );
        if let Some(state) = self.arena.get_mut(hero_id) {
            state.last_result = Some(result.clone());
        }
        events.push(GameEvent::ArenaBattleResolved {
            hero_id: hero_id.to_string(),
            result,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::HeroClass;
    use crate::core::config::GameConfig;
    use crate::core::rng::ScriptedRolls;

    fn game_with_hero() -> (Game, String) {
        let mut game = Game::with_rng(GameConfig::default(), 0, ScriptedRolls::new([]));
        let hero = game.create_hero("Aria", HeroClass::Warrior).unwrap();
        (game, hero.id)
    }

    #[test]
    fn test_battle_requires_opponent() {
        let (mut game, id) = game_with_hero();
        let err = game.start_battle(&id, "anyone").unwrap_err();
        assert_eq!(err, GameError::from(Precondition::NoOpponent));
    }

    #[test]
    fn test_wrong_opponent_id() {
        let (mut game, id) = game_with_hero();
        game.find_opponent(&id).unwrap();
        let err = game.start_battle(&id, "someone-else").unwrap_err();
        assert!(matches!(err, GameError::NotFound { entity: Entity::Opponent, .. }));
    }

    #[test]
    fn test_one_battle_in_flight() {
        let (mut game, id) = game_with_hero();
        let opponent = game.find_opponent(&id).unwrap();
        let battle = game.start_battle(&id, &opponent.id).unwrap();
        assert_eq!(battle.resolves_at, 2_000);
        assert!(game.battle_in_progress(&id));

        let hero_stats = game.hero(&id).unwrap().stats();
        assert_eq!(battle.win_chance, opponent.preview_win_probability(&hero_stats));
        assert!((0.1..=0.9).contains(&battle.win_chance));

        assert_eq!(
            game.find_opponent(&id).unwrap_err(),
            GameError::from(Precondition::BattleInProgress)
        );
        assert_eq!(
            game.start_battle(&id, &opponent.id).unwrap_err(),
            GameError::from(Precondition::BattleInProgress)
        );
    }

    #[test]
    fn test_result_arrives_after_delay() {
        let (mut game, id) = game_with_hero();
        let opponent = game.find_opponent(&id).unwrap();
        game.start_battle(&id, &opponent.id).unwrap();

        assert!(game.advance(1_999).is_empty());
        assert!(game.last_battle_result(&id).is_none());

        let events = game.advance(1);
        assert_eq!(events.len(), 1);
        let GameEvent::ArenaBattleResolved { result, .. } = &events[0] else {
            panic!("expected a battle result");
        };
        assert_eq!(game.last_battle_result(&id), Some(result));
        assert!(!game.battle_in_progress(&id));
        assert!(game.hero(&id).unwrap().experience > 0);
    }

    #[test]
    fn test_leaderboard_built_on_demand() {
        let (mut game, id) = game_with_hero();
        let board = game.leaderboard();
        assert_eq!(board.len(), 21);
        assert!(board.iter().any(|entry| entry.id == id));
    }
}
