use super::types::{generate_enemy, CombatLog, Enemy, EnemyRewards, LogKind};
use crate::character::Hero;
use crate::core::combat_math::{apply_crit, roll_damage};
use crate::core::config::RewardScheme;
use crate::core::constants::*;
use crate::core::error::{GameResult, Precondition};
use crate::core::rng::RandomSource;
use crate::items::Materials;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroAction {
    Attack,
    Defend,
    Evade,
}

impl HeroAction {
    /// Map one uniform draw onto the 70/15/15 action split.
    pub fn from_roll(roll: f64) -> Self {
        if roll < HERO_ATTACK_CHANCE {
            HeroAction::Attack
        } else if roll < HERO_ATTACK_CHANCE + HERO_DEFEND_CHANCE {
            HeroAction::Defend
        } else {
            HeroAction::Evade
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyAction {
    Attack,
    Prepare,
}

impl EnemyAction {
    pub fn from_roll(roll: f64) -> Self {
        if roll < ENEMY_ATTACK_CHANCE {
            EnemyAction::Attack
        } else {
            EnemyAction::Prepare
        }
    }
}

/// An enemy killed during a round and what it paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefeatedEnemy {
    pub name: String,
    pub rewards: EnemyRewards,
}

/// Everything that happened in one idle round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub hero_action: HeroAction,
    pub damage_dealt: u32,
    pub hero_crit: bool,
    /// None when the enemy died before it could act.
    pub enemy_action: Option<EnemyAction>,
    pub damage_taken: u32,
    pub enemy_crit: bool,
    pub evaded: bool,
    pub defeated: Option<DefeatedEnemy>,
    pub levels_gained: u32,
    pub hero_defeated: bool,
}

/// Rewards earned since the last collect. They are already applied to the
/// hero; this is a tally for the player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRewards {
    pub gold: u64,
    pub experience: u64,
    pub materials: Materials,
}

impl PendingRewards {
    pub fn is_empty(&self) -> bool {
        self.gold == 0 && self.experience == 0 && self.materials.is_empty()
    }

    fn add(&mut self, rewards: &EnemyRewards) {
        self.gold = self.gold.saturating_add(rewards.gold);
        self.experience = self.experience.saturating_add(rewards.experience);
        self.materials.merge(&rewards.materials());
    }
}

/// Counters for the current idle session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleStats {
    pub enemies_defeated: u64,
    pub total_idle_seconds: u64,
    pub total_gold: u64,
    pub total_experience: u64,
    pub defeats: u64,
}

/// Per-hero idle combat state.
///
/// `epoch` changes every time the session stops. A scheduled tick carries
/// the epoch it was created under and is dropped if the two disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdleSession {
    pub active: bool,
    pub epoch: u64,
    pub enemy: Option<Enemy>,
    pub pending: PendingRewards,
    pub stats: IdleStats,
    pub log: CombatLog,
    /// Set while the hero is down; cleared by `finish_recovery`.
    pub recovering_until: Option<i64>,
    pub recovery_delay_ms: u64,
}

impl Default for IdleSession {
    fn default() -> Self {
        Self::new(COMBAT_LOG_CAPACITY)
    }
}

impl IdleSession {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            active: false,
            epoch: 0,
            enemy: None,
            pending: PendingRewards::default(),
            stats: IdleStats::default(),
            log: CombatLog::with_capacity(log_capacity),
            recovering_until: None,
            recovery_delay_ms: RECOVERY_DELAY_MS,
        }
    }

    pub fn with_recovery_delay(mut self, delay_ms: u64) -> Self {
        self.recovery_delay_ms = delay_ms;
        self
    }

    pub fn is_recovering(&self) -> bool {
        self.recovering_until.is_some()
    }

    /// True when a tick scheduled under `epoch` should still run.
    pub fn accepts_tick(&self, epoch: u64) -> bool {
        self.active && self.epoch == epoch
    }

    /// Begin fighting. Fails if already fighting or still recovering.
    pub fn start(
        &mut self,
        hero: &Hero,
        scheme: RewardScheme,
        now_ms: i64,
        rng: &mut dyn RandomSource,
    ) -> GameResult<&Enemy> {
        if self.active {
            return Err(Precondition::IdleCombatActive.into());
        }
        if self.is_recovering() || !hero.is_alive() {
            return Err(Precondition::HeroRecovering.into());
        }

        let enemy = generate_enemy(hero.level, scheme, rng);
        self.log.push(
            LogKind::Damage,
            format!("Started combat with {}!", enemy.name),
            now_ms,
        );
        self.active = true;
        Ok(self.enemy.insert(enemy))
    }

    /// Stop fighting and invalidate any outstanding tick. Returns whether the
    /// session was active; stopping an idle session changes nothing.
    pub fn stop(&mut self, now_ms: i64) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.epoch += 1;
        self.enemy = None;
        self.log
            .push(LogKind::Damage, "Stopped idle combat.".to_string(), now_ms);
        true
    }

    /// Hand over the pending tally and reset it. Nothing is logged when the
    /// tally is empty.
    pub fn collect(&mut self, now_ms: i64) -> PendingRewards {
        if self.pending.is_empty() {
            return PendingRewards::default();
        }
        let collected = std::mem::take(&mut self.pending);
        self.log.push(
            LogKind::Victory,
            format!(
                "Collected idle rewards: {} gold, {} EXP!",
                collected.gold, collected.experience
            ),
            now_ms,
        );
        collected
    }

    /// Count wall time spent fighting, on the session and on the hero.
    pub fn record_idle_time(&mut self, hero: &mut Hero, seconds: u64) {
        self.stats.total_idle_seconds += seconds;
        hero.combat_record.total_idle_seconds += seconds;
    }

    /// Put the hero down for the recovery delay. Returns when it ends.
    pub fn begin_recovery(&mut self, now_ms: i64) -> i64 {
        let recovers_at = now_ms + self.recovery_delay_ms as i64;
        self.recovering_until = Some(recovers_at);
        recovers_at
    }

    /// End a recovery: full heal and a log line.
    pub fn finish_recovery(&mut self, hero: &mut Hero, now_ms: i64) {
        hero.heal(None);
        self.recovering_until = None;
        self.log.push(
            LogKind::Heal,
            "You have fully recovered and are ready for combat!".to_string(),
            now_ms,
        );
    }
}

/// Play one round of idle combat against the session's current enemy.
///
/// Draw order: hero action, then for an attack the damage and crit rolls.
/// If the enemy survives it rolls its action, then damage, then either the
/// evade roll (hero evading) or the crit roll (hero attacking). A defending
/// hero halves the hit with no further draw.
///
/// Returns `None` if the session is inactive or has no enemy.
pub fn resolve_round(
    hero: &mut Hero,
    session: &mut IdleSession,
    scheme: RewardScheme,
    now_ms: i64,
    rng: &mut dyn RandomSource,
) -> Option<RoundOutcome> {
    if !session.active {
        return None;
    }
    let enemy = session.enemy.as_mut()?;
    let mut messages = Vec::new();

    let hero_action = HeroAction::from_roll(rng.next_f64());
    let mut damage_dealt = 0;
    let mut hero_crit = false;
    match hero_action {
        HeroAction::Attack => {
            damage_dealt = roll_damage(hero.attack, enemy.defense, rng);
            if rng.chance(HERO_CRIT_CHANCE) {
                hero_crit = true;
                damage_dealt = apply_crit(damage_dealt, HERO_CRIT_MULTIPLIER);
                messages.push(format!(
                    "CRITICAL HIT! You deal {} damage to {}!",
                    damage_dealt, enemy.name
                ));
            } else {
                messages.push(format!(
                    "You attack {} for {} damage!",
                    enemy.name, damage_dealt
                ));
            }
        }
        HeroAction::Defend => messages.push("You raise your guard and prepare to defend!".into()),
        HeroAction::Evade => messages.push("You attempt to evade the next attack!".into()),
    }
    enemy.take_damage(damage_dealt);

    let mut outcome = RoundOutcome {
        hero_action,
        damage_dealt,
        hero_crit,
        enemy_action: None,
        damage_taken: 0,
        enemy_crit: false,
        evaded: false,
        defeated: None,
        levels_gained: 0,
        hero_defeated: false,
    };

    if enemy.is_alive() {
        let enemy_action = EnemyAction::from_roll(rng.next_f64());
        outcome.enemy_action = Some(enemy_action);
        match enemy_action {
            EnemyAction::Attack => {
                let mut damage = roll_damage(enemy.attack, hero.defense, rng);
                if hero_action == HeroAction::Evade && rng.chance(EVADE_SUCCESS_CHANCE) {
                    outcome.evaded = true;
                    damage = 0;
                    messages.push(format!("You successfully evade {}'s attack!", enemy.name));
                } else if hero_action == HeroAction::Defend {
                    damage = (damage as f64 * DEFEND_DAMAGE_FACTOR).floor() as u32;
                    messages.push(format!(
                        "You block some damage! {} deals {} damage!",
                        enemy.name, damage
                    ));
                } else if rng.chance(ENEMY_CRIT_CHANCE) {
                    outcome.enemy_crit = true;
                    damage = apply_crit(damage, ENEMY_CRIT_MULTIPLIER);
                    messages.push(format!(
                        "{} lands a critical hit for {} damage!",
                        enemy.name, damage
                    ));
                } else {
                    messages.push(format!("{} attacks you for {} damage!", enemy.name, damage));
                }
                outcome.damage_taken = damage;
                hero.take_damage(damage);
            }
            EnemyAction::Prepare => messages.push(format!("{} prepares to defend!", enemy.name)),
        }
    }

    for message in messages {
        session.log.push(LogKind::Damage, message, now_ms);
    }

    if !enemy.is_alive() {
        let defeated = DefeatedEnemy {
            name: enemy.name.clone(),
            rewards: enemy.rewards,
        };
        outcome.levels_gained = claim_kill(hero, session, &defeated, now_ms);
        session.enemy = Some(generate_enemy(hero.level, scheme, rng));
        outcome.defeated = Some(defeated);
    } else if !hero.is_alive() {
        let name = enemy.name.clone();
        session.stop(now_ms);
        session.stats.defeats += 1;
        hero.combat_record.defeats += 1;
        let delay_ms = session.recovery_delay_ms;
        session.begin_recovery(now_ms);
        session.log.push(
            LogKind::Defeat,
            format!(
                "Defeated by {}! Recovering in {} seconds...",
                name,
                delay_ms / MS_PER_SECOND as u64
            ),
            now_ms,
        );
        outcome.hero_defeated = true;
    }

    Some(outcome)
}

/// Apply a kill's rewards to the hero and tally them. Returns levels gained.
fn claim_kill(hero: &mut Hero, session: &mut IdleSession, defeated: &DefeatedEnemy, now_ms: i64) -> u32 {
    let rewards = &defeated.rewards;
    let levels_gained = hero.gain_experience(rewards.experience, now_ms);
    hero.gain_gold(rewards.gold);
    hero.materials.merge(&rewards.materials());

    session.pending.add(rewards);
    session.stats.enemies_defeated += 1;
    session.stats.total_gold += rewards.gold;
    session.stats.total_experience += rewards.experience;

    let record = &mut hero.combat_record;
    record.enemies_defeated += 1;
    record.total_gold += rewards.gold;
    record.total_experience += rewards.experience;

    session.log.push(
        LogKind::Victory,
        format!(
            "Victory! Defeated {}! Gained {} EXP and {} gold!",
            defeated.name, rewards.experience, rewards.gold
        ),
        now_ms,
    );
    if let Some(kind) = rewards.material {
        session.log.push(
            LogKind::Victory,
            format!("Materials gained: 1 {}", kind.name()),
            now_ms,
        );
    }
    if levels_gained > 0 {
        session.log.push(
            LogKind::LevelUp,
            format!("Level up! {} is now level {}!", hero.name, hero.level),
            now_ms,
        );
    }
    levels_gained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::HeroClass;
    use crate::combat::types::EnemyKind;
    use crate::core::error::GameError;
    use crate::core::rng::ScriptedRolls;
    use crate::items::MaterialKind;

    fn warrior() -> Hero {
        Hero::new("Aria", HeroClass::Warrior, 0).unwrap()
    }

    fn enemy(health: u32, attack: u32, defense: u32) -> Enemy {
        Enemy {
            id: "e1".into(),
            name: "Orc (Lv.1)".into(),
            level: 1,
            kind: EnemyKind::Monster,
            max_health: health,
            current_health: health,
            attack,
            defense,
            rewards: EnemyRewards {
                experience: 10,
                gold: 10,
                material: Some(MaterialKind::Wood),
            },
        }
    }

    fn fighting(health: u32, attack: u32, defense: u32) -> IdleSession {
        let mut session = IdleSession::default();
        session.active = true;
        session.enemy = Some(enemy(health, attack, defense));
        session
    }

    #[test]
    fn test_action_split() {
        assert_eq!(HeroAction::from_roll(0.0), HeroAction::Attack);
        assert_eq!(HeroAction::from_roll(0.69), HeroAction::Attack);
        assert_eq!(HeroAction::from_roll(0.70), HeroAction::Defend);
        assert_eq!(HeroAction::from_roll(0.849), HeroAction::Defend);
        assert_eq!(HeroAction::from_roll(0.85), HeroAction::Evade);
        assert_eq!(EnemyAction::from_roll(0.74), EnemyAction::Attack);
        assert_eq!(EnemyAction::from_roll(0.75), EnemyAction::Prepare);
    }

    #[test]
    fn test_attack_then_counter() {
        let mut hero = warrior();
        let mut session = fighting(100, 20, 10);
        // attack, damage roll 0.5, no crit, enemy attacks, damage 0.5, no crit
        let mut rolls = ScriptedRolls::new([0.1, 0.5, 0.9, 0.1, 0.5, 0.9]);
        let outcome = resolve_round(&mut hero, &mut session, RewardScheme::Flat, 0, &mut rolls).unwrap();

        assert_eq!(outcome.hero_action, HeroAction::Attack);
        assert_eq!(outcome.damage_dealt, 10); // 15 - 10/2
        assert_eq!(outcome.enemy_action, Some(EnemyAction::Attack));
        assert_eq!(outcome.damage_taken, 15); // 20 - 10/2
        assert_eq!(hero.current_health, 105);
        assert_eq!(session.enemy.as_ref().unwrap().current_health, 90);
        assert_eq!(session.log.len(), 2);
        assert_eq!(rolls.remaining(), 0);
    }

    #[test]
    fn test_hero_crit() {
        let mut hero = warrior();
        let mut session = fighting(100, 20, 10);
        let mut rolls = ScriptedRolls::new([0.1, 0.5, 0.05, 0.9]);
        let outcome = resolve_round(&mut hero, &mut session, RewardScheme::Flat, 0, &mut rolls).unwrap();
        assert!(outcome.hero_crit);
        assert_eq!(outcome.damage_dealt, 15);
        assert_eq!(outcome.enemy_action, Some(EnemyAction::Prepare));
        assert_eq!(hero.current_health, hero.max_health);
    }

    #[test]
    fn test_defend_halves_without_crit_roll() {
        let mut hero = warrior();
        let mut session = fighting(100, 21, 10);
        // defend, enemy attacks, damage 16 halved to 8
        let mut rolls = ScriptedRolls::new([0.75, 0.1, 0.5]);
        let outcome = resolve_round(&mut hero, &mut session, RewardScheme::Flat, 0, &mut rolls).unwrap();
        assert_eq!(outcome.damage_dealt, 0);
        assert_eq!(outcome.damage_taken, 8);
        assert!(!outcome.enemy_crit);
        assert_eq!(rolls.remaining(), 0);
    }

    #[test]
    fn test_successful_evade_negates() {
        let mut hero = warrior();
        let mut session = fighting(100, 20, 10);
        let mut rolls = ScriptedRolls::new([0.9, 0.1, 0.5, 0.2]);
        let outcome = resolve_round(&mut hero, &mut session, RewardScheme::Flat, 0, &mut rolls).unwrap();
        assert!(outcome.evaded);
        assert_eq!(outcome.damage_taken, 0);
        assert_eq!(hero.current_health, hero.max_health);
    }

    #[test]
    fn test_failed_evade_can_crit() {
        let mut hero = warrior();
        let mut session = fighting(100, 20, 10);
        // evade fails at 0.5, crit at 0.01: 15 * 1.3 = 19
        let mut rolls = ScriptedRolls::new([0.9, 0.1, 0.5, 0.5, 0.01]);
        let outcome = resolve_round(&mut hero, &mut session, RewardScheme::Flat, 0, &mut rolls).unwrap();
        assert!(!outcome.evaded);
        assert!(outcome.enemy_crit);
        assert_eq!(outcome.damage_taken, 19);
    }

    #[test]
    fn test_kill_applies_rewards_and_respawns() {
        let mut hero = warrior();
        let gold_before = hero.gold;
        let wood_before = hero.materials.get(MaterialKind::Wood);
        let mut session = fighting(5, 20, 10);
        let mut rolls = ScriptedRolls::new([0.1, 0.5, 0.9]);
        let outcome = resolve_round(&mut hero, &mut session, RewardScheme::Flat, 42, &mut rolls).unwrap();

        let defeated = outcome.defeated.unwrap();
        assert_eq!(defeated.name, "Orc (Lv.1)");
        assert_eq!(outcome.enemy_action, None);
        assert_eq!(hero.gold, gold_before + 10);
        assert_eq!(hero.experience, 10);
        assert_eq!(hero.materials.get(MaterialKind::Wood), wood_before + 1);
        assert_eq!(hero.last_active, 42);
        assert_eq!(session.pending.gold, 10);
        assert_eq!(session.pending.materials.get(MaterialKind::Wood), 1);
        assert_eq!(session.stats.enemies_defeated, 1);
        assert_eq!(hero.combat_record.enemies_defeated, 1);
        assert!(session.enemy.as_ref().unwrap().is_alive());
        assert_eq!(session.log.latest().unwrap().kind, LogKind::Victory);
    }

    #[test]
    fn test_kill_logs_level_up() {
        let mut hero = warrior();
        hero.experience = 95;
        let mut session = fighting(5, 20, 10);
        let mut rolls = ScriptedRolls::new([0.1, 0.5, 0.9]);
        let outcome = resolve_round(&mut hero, &mut session, RewardScheme::Flat, 0, &mut rolls).unwrap();
        assert_eq!(outcome.levels_gained, 1);
        assert_eq!(hero.level, 2);
        assert!(session.log.iter().any(|e| e.kind == LogKind::LevelUp));
    }

    #[test]
    fn test_hero_death_stops_session() {
        let mut hero = warrior();
        hero.current_health = 3;
        let mut session = fighting(100, 20, 10);
        let epoch = session.epoch;
        let mut rolls = ScriptedRolls::new([0.1, 0.5, 0.9, 0.1, 0.5, 0.9]);
        let outcome = resolve_round(&mut hero, &mut session, RewardScheme::Flat, 1_000, &mut rolls).unwrap();

        assert!(outcome.hero_defeated);
        assert_eq!(hero.current_health, 0);
        assert!(!session.active);
        assert!(session.enemy.is_none());
        assert!(!session.accepts_tick(epoch));
        assert_eq!(session.recovering_until, Some(6_000));
        assert_eq!(session.stats.defeats, 1);
        assert_eq!(session.log.latest().unwrap().kind, LogKind::Defeat);

        let err = session.start(&hero, RewardScheme::Flat, 2_000, &mut rolls).unwrap_err();
        assert_eq!(err, GameError::from(Precondition::HeroRecovering));

        session.finish_recovery(&mut hero, 6_000);
        assert_eq!(hero.current_health, hero.max_health);
        assert!(session.start(&hero, RewardScheme::Flat, 6_000, &mut rolls).is_ok());
    }

    #[test]
    fn test_inactive_session_does_nothing() {
        let mut hero = warrior();
        let mut session = IdleSession::default();
        let mut rolls = ScriptedRolls::new([0.1]);
        assert!(resolve_round(&mut hero, &mut session, RewardScheme::Flat, 0, &mut rolls).is_none());
        assert_eq!(rolls.remaining(), 1);
    }

    #[test]
    fn test_start_twice_fails() {
        let hero = warrior();
        let mut session = IdleSession::default();
        let mut rolls = ScriptedRolls::new([]);
        let name = session
            .start(&hero, RewardScheme::Flat, 0, &mut rolls)
            .unwrap()
            .name
            .clone();
        assert_eq!(
            session.log.latest().unwrap().message,
            format!("Started combat with {}!", name)
        );
        let err = session.start(&hero, RewardScheme::Flat, 0, &mut rolls).unwrap_err();
        assert_eq!(err, GameError::from(Precondition::IdleCombatActive));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let hero = warrior();
        let mut session = IdleSession::default();
        session
            .start(&hero, RewardScheme::Flat, 0, &mut ScriptedRolls::new([]))
            .unwrap();
        assert!(session.stop(10));
        let logged = session.log.len();
        assert!(!session.stop(20));
        assert_eq!(session.log.len(), logged);
        assert_eq!(session.epoch, 1);
    }

    #[test]
    fn test_collect_zeroes_and_is_idempotent() {
        let mut session = IdleSession::default();
        assert!(session.collect(0).is_empty());
        assert!(session.log.is_empty());

        session.pending.gold = 30;
        session.pending.experience = 30;
        let collected = session.collect(5);
        assert_eq!(collected.gold, 30);
        assert_eq!(
            session.log.latest().unwrap().message,
            "Collected idle rewards: 30 gold, 30 EXP!"
        );
        assert!(session.pending.is_empty());
        assert!(session.collect(6).is_empty());
        assert_eq!(session.log.len(), 1);
    }

    #[test]
    fn test_idle_time_counts_twice() {
        let mut hero = warrior();
        let mut session = IdleSession::default();
        session.record_idle_time(&mut hero, 3);
        session.record_idle_time(&mut hero, 3);
        assert_eq!(session.stats.total_idle_seconds, 6);
        assert_eq!(hero.combat_record.total_idle_seconds, 6);
    }
}
