//! Idle combat through the engine: cadence, death, recovery and invariants.

use idle_arena::character::{HeroClass, HeroPatch};
use idle_arena::combat::LogKind;
use idle_arena::core::config::{GameConfig, RewardScheme};
use idle_arena::core::error::{GameError, Precondition};
use idle_arena::core::rng::ScriptedRolls;
use idle_arena::{Game, GameEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

// =========================================================================
// Death and recovery
// =========================================================================

/// Every roll is 0.5: the hero attacks a level 1 Wolf (66 hp, 7 atk, 4 def)
/// and the wolf hits back for 2.
fn scripted_game() -> (Game, String) {
    let mut game = Game::with_rng(GameConfig::default(), 0, ScriptedRolls::new([]));
    let hero = game.create_hero("Aria", HeroClass::Warrior).unwrap();
    (game, hero.id)
}

fn nearly_dead(game: &mut Game, hero_id: &str) {
    let patch = HeroPatch {
        current_health: Some(1),
        ..HeroPatch::default()
    };
    game.update_hero(hero_id, &patch).unwrap();
}

#[test]
fn test_first_enemy_from_fixed_rolls() {
    let (mut game, id) = scripted_game();
    let enemy = game.start_idle(&id).unwrap();
    assert_eq!(enemy.name, "Wolf (Lv.1)");
    assert_eq!((enemy.max_health, enemy.attack, enemy.defense), (66, 7, 4));
    assert_eq!(enemy.rewards.gold, 10);
    assert_eq!(enemy.rewards.material, None);
}

#[test]
fn test_defeat_then_recovery_without_resume() {
    let (mut game, id) = scripted_game();
    game.start_idle(&id).unwrap();
    nearly_dead(&mut game, &id);

    let events = game.advance(3_000);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::HeroDefeated { recovers_at: 8_000, .. }
    )));
    let session = game.idle_session(&id).unwrap();
    assert!(!session.active);
    assert!(session.is_recovering());
    assert_eq!(session.log.latest().map(|entry| entry.kind), Some(LogKind::Defeat));
    assert_eq!(
        session.log.latest().map(|entry| entry.message.as_str()),
        Some("Defeated by Wolf (Lv.1)! Recovering in 5 seconds...")
    );

    // no restart while recovering
    game.advance(2_000);
    assert_eq!(
        game.start_idle(&id).unwrap_err(),
        GameError::from(Precondition::HeroRecovering)
    );

    let events = game.advance(3_000);
    assert_eq!(
        count(&events, |e| matches!(e, GameEvent::HeroRecovered { .. })),
        1
    );
    let hero = game.hero(&id).unwrap();
    assert_eq!(hero.current_health, hero.max_health);
    assert_eq!(hero.combat_record.defeats, 1);

    // recovery does not resume the loop
    let events = game.advance(60_000);
    assert_eq!(
        count(&events, |e| matches!(e, GameEvent::IdleRound { .. })),
        0
    );
    assert!(game.start_idle(&id).is_ok());
}

#[test]
fn test_hero_moved_while_down_still_recovers() {
    let (mut game, id) = scripted_game();
    game.start_idle(&id).unwrap();
    nearly_dead(&mut game, &id);
    game.advance(3_000);
    let json = game.export_hero(&id).unwrap();

    let mut other = Game::with_rng(GameConfig::default(), 0, ScriptedRolls::new([]));
    other.import_hero(&json).unwrap();
    assert_eq!(other.hero(&id).unwrap().current_health, 0);
    assert_eq!(
        other.start_idle(&id).unwrap_err(),
        GameError::from(Precondition::HeroRecovering)
    );

    let events = other.advance(5_000);
    assert_eq!(
        count(&events, |e| matches!(e, GameEvent::HeroRecovered { .. })),
        1
    );
    assert!(other.start_idle(&id).is_ok());
}

#[test]
fn test_kill_grants_flat_rewards() {
    let (mut game, id) = scripted_game();
    game.start_idle(&id).unwrap();

    // 13 damage a round kills the 66 hp wolf on the sixth round
    let events = game.advance(18_000);
    let kills: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::IdleRound { outcome, .. } => outcome.defeated.clone(),
            _ => None,
        })
        .collect();
    assert_eq!(kills.len(), 1);

    let hero = game.hero(&id).unwrap();
    assert_eq!(hero.gold, 110);
    assert_eq!(hero.experience, 10);
    assert_eq!(hero.current_health, 120 - 5 * 2);
    assert_eq!(hero.combat_record.enemies_defeated, 1);

    let pending = game.collect_idle_rewards(&id).unwrap();
    assert_eq!((pending.gold, pending.experience), (10, 10));
    assert!(game.collect_idle_rewards(&id).unwrap().is_empty());
}

#[test]
fn test_restart_after_stop_ignores_old_tick() {
    let (mut game, id) = scripted_game();
    game.start_idle(&id).unwrap();
    game.advance(2_000);
    game.stop_idle(&id).unwrap();
    game.start_idle(&id).unwrap();

    // the cancelled tick at 3000 never fires; the new one lands at 5000
    let events = game.advance(2_000);
    assert_eq!(
        count(&events, |e| matches!(e, GameEvent::IdleRound { .. })),
        0
    );
    let events = game.advance(1_000);
    assert_eq!(
        count(&events, |e| matches!(e, GameEvent::IdleRound { .. })),
        1
    );
}

// =========================================================================
// Long runs
// =========================================================================

fn run_for_an_hour(scheme: RewardScheme, seed: u64) {
    let config = GameConfig {
        idle_rewards: scheme,
        ..GameConfig::default()
    };
    let mut game = Game::with_rng(config, 0, ChaCha8Rng::seed_from_u64(seed));
    let id = game.create_hero("Aria", HeroClass::Guardian).unwrap().id;
    game.start_idle(&id).unwrap();

    let mut last_gold = game.hero(&id).unwrap().gold;
    for _ in 0..60 {
        for event in game.advance(60_000) {
            if let GameEvent::HeroRecovered { .. } = event {
                game.start_idle(&id).unwrap();
            }
        }
        let hero = game.hero(&id).unwrap();
        assert!(hero.current_health <= hero.max_health);
        assert!(hero.experience < hero.experience_to_next);
        assert!(hero.gold >= last_gold, "idle combat never costs gold");
        last_gold = hero.gold;

        let session = game.idle_session(&id).unwrap();
        assert!(session.log.len() <= 50);
    }

    let hero = game.hero(&id).unwrap();
    assert!(hero.combat_record.enemies_defeated > 0);
    assert_eq!(hero.combat_record.total_idle_seconds % 3, 0);
}

#[test]
fn test_hour_of_flat_rewards() {
    run_for_an_hour(RewardScheme::Flat, 1);
}

#[test]
fn test_hour_of_level_scaled_rewards() {
    run_for_an_hour(RewardScheme::LevelScaled, 2);
}
