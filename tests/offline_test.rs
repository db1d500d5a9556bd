//! Offline accrual: window, efficiency curve, material rolls and claims.

use idle_arena::character::{Hero, HeroClass};
use idle_arena::core::constants::MAX_OFFLINE_SECONDS;
use idle_arena::core::error::{GameError, Precondition};
use idle_arena::core::offline::{
    apply_offline_claim, calculate_offline_rewards, offline_efficiency, offline_gold_and_experience,
    validate_claim, OfflineRewards,
};
use idle_arena::core::rng::ScriptedRolls;
use idle_arena::items::{MaterialKind, Materials};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const HOUR: i64 = 3_600;

#[test]
fn test_efficiency_curve() {
    assert_eq!(offline_efficiency(0.5), 1.0);
    assert_eq!(offline_efficiency(2.0), 1.0);
    assert!((offline_efficiency(4.0) - 0.8).abs() < 1e-9);
    assert!((offline_efficiency(8.0) - 0.4).abs() < 1e-9);
    assert_eq!(offline_efficiency(20.0), 0.3);
}

#[test]
fn test_two_hours_at_level_five() {
    // 70 gold/h and 135 exp/h at full efficiency
    assert_eq!(offline_gold_and_experience(2 * HOUR, 5), (140, 270));
}

#[test]
fn test_window_caps_at_eight_hours() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let rewards = calculate_offline_rewards(30 * HOUR, 3, &mut rng);
    assert_eq!(rewards.offline_seconds, MAX_OFFLINE_SECONDS);
    assert_eq!(
        (rewards.gold, rewards.experience),
        offline_gold_and_experience(8 * HOUR, 3)
    );
}

#[test]
fn test_payout_never_shrinks_with_time() {
    let mut previous = (0, 0);
    for minutes in (5..=8 * 60).step_by(5) {
        let current = offline_gold_and_experience(minutes * 60, 10);
        assert!(current.0 >= previous.0 && current.1 >= previous.1, "{} min", minutes);
        previous = current;
    }
}

#[test]
fn test_material_rolls_hit_and_miss() {
    // one hour: base chance 0.4 + 0.1 = 0.5, crystals 0.3
    // iron ore hits with quantity roll 0.99 -> floor(0.99 * 2) + 1 = 2
    // leather, cloth and wood miss; crystals hit with quantity 1
    let mut rolls = ScriptedRolls::new([0.1, 0.99, 0.6, 0.6, 0.6, 0.2, 0.0]);
    let rewards = calculate_offline_rewards(HOUR, 1, &mut rolls);
    assert_eq!(
        rewards.materials,
        Materials::from_pairs(&[(MaterialKind::IronOre, 2), (MaterialKind::Crystals, 1)])
    );
    assert_eq!(rolls.remaining(), 0);
    assert!(validate_claim(&rewards, 1).is_ok());
}

#[test]
fn test_claim_rejections() {
    let honest = OfflineRewards {
        offline_seconds: HOUR,
        gold: 38,
        experience: 75,
        materials: Materials::new(),
    };
    assert!(validate_claim(&honest, 1).is_ok());

    let too_long = OfflineRewards {
        offline_seconds: MAX_OFFLINE_SECONDS + 1,
        ..honest.clone()
    };
    assert!(matches!(
        validate_claim(&too_long, 1),
        Err(GameError::PreconditionFailed(Precondition::OfflineWindowExceeded { .. }))
    ));

    let greedy = OfflineRewards {
        gold: 39,
        ..honest.clone()
    };
    assert!(matches!(
        validate_claim(&greedy, 1),
        Err(GameError::InvalidArgument(_))
    ));

    let gems = OfflineRewards {
        materials: Materials::from_pairs(&[(MaterialKind::Gems, 1)]),
        ..honest
    };
    assert!(matches!(
        validate_claim(&gems, 1),
        Err(GameError::InvalidArgument(_))
    ));
}

#[test]
fn test_bonus_claim_doubles_everything() {
    let mut hero = Hero::new("Aria", HeroClass::Guardian, 0).unwrap();
    let rewards = OfflineRewards {
        offline_seconds: HOUR,
        gold: 38,
        experience: 75,
        materials: Materials::from_pairs(&[(MaterialKind::Wood, 2)]),
    };
    let claim = apply_offline_claim(&mut hero, &rewards, 2.0, 9_000).unwrap();
    assert!(claim.bonus_applied);
    assert_eq!(claim.gold_gained, 76);
    assert_eq!(claim.materials.get(MaterialKind::Wood), 4);
    assert_eq!(hero.materials.get(MaterialKind::Wood), 12 + 4);
    assert_eq!(hero.level, 2);
    assert_eq!(hero.last_active, 9_000);
}
