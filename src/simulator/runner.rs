//! Simulation runner driving the real engine through `Game::advance`.
//!
//! Each run plays one hero minute by minute. Idle combat restarts after
//! every recovery; crafting and arena battles are optional side activities.

use super::config::SimConfig;
use super::report::SimReport;
use crate::character::Hero;
use crate::core::balance::power_rating;
use crate::core::error::{Entity, GameError, GameResult};
use crate::enhancement::{enhancement_cost, MAX_ENHANCEMENT_LEVEL};
use crate::game::{Game, GameEvent};
use crate::items::EquipmentSlot;
use crate::workshop::RECIPES;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

const MINUTE_MS: u64 = 60_000;

/// Outcome of one simulated playthrough.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub final_level: u32,
    pub final_gold: u64,
    pub final_honor: u64,
    pub final_rank: u32,
    pub final_power: f64,
    pub enemies_defeated: u64,
    pub defeats: u64,
    pub arena_wins: u32,
    pub arena_losses: u32,
    pub items_crafted: u32,
    pub enhancements: u32,
    /// Minute at which each level from 2 upward was reached
    pub level_up_minutes: Vec<u64>,
}

impl RunStats {
    pub fn arena_battles(&self) -> u32 {
        self.arena_wins + self.arena_losses
    }
}

/// Run every configured playthrough and aggregate the results.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => StdRng::from_entropy(),
        };
        match simulate_single_run(config, rng) {
            Ok(stats) => {
                debug!(
                    "run {}/{}: level {}, {} kills, {} defeats",
                    run_idx + 1,
                    config.num_runs,
                    stats.final_level,
                    stats.enemies_defeated,
                    stats.defeats
                );
                all_runs.push(stats);
            }
            Err(e) => warn!("run {} aborted: {}", run_idx + 1, e),
        }
    }

    SimReport::from_runs(all_runs, config.hours)
}

fn snapshot(game: &Game, hero_id: &str) -> GameResult<Hero> {
    game.hero(hero_id)
        .cloned()
        .ok_or_else(|| GameError::not_found(Entity::Hero, hero_id))
}

/// Play one hero for `config.hours` of simulated time.
pub fn simulate_single_run(config: &SimConfig, rng: StdRng) -> GameResult<RunStats> {
    let mut game = Game::with_rng(config.game.clone(), 0, rng);
    let hero_id = game.create_hero("Simulant", config.class)?.id;
    game.start_idle(&hero_id)?;

    let mut stats = RunStats::default();
    let mut level = 1;

    for minute in 1..=config.hours as u64 * 60 {
        for event in game.advance(MINUTE_MS) {
            match event {
                GameEvent::HeroRecovered { .. } => {
                    game.start_idle(&hero_id)?;
                }
                GameEvent::ArenaBattleResolved { result, .. } => {
                    if result.victory {
                        stats.arena_wins += 1;
                    } else {
                        stats.arena_losses += 1;
                    }
                }
                _ => {}
            }
        }

        if config.simulate_crafting {
            tend_workshop(&mut game, &hero_id, &mut stats)?;
        }
        if config.arena_every_minutes > 0
            && minute % config.arena_every_minutes as u64 == 0
            && !game.battle_in_progress(&hero_id)
        {
            let opponent = game.find_opponent(&hero_id)?;
            game.start_battle(&hero_id, &opponent.id)?;
        }

        let hero_level = snapshot(&game, &hero_id)?.level;
        while level < hero_level {
            level += 1;
            stats.level_up_minutes.push(minute);
        }
    }

    game.stop_idle(&hero_id)?;
    game.collect_idle_rewards(&hero_id)?;

    let hero = snapshot(&game, &hero_id)?;
    stats.final_level = hero.level;
    stats.final_gold = hero.gold;
    stats.final_honor = hero.honor_points;
    stats.final_rank = hero.arena_rank;
    stats.final_power = power_rating(&hero.stats());
    stats.enemies_defeated = hero.combat_record.enemies_defeated;
    stats.defeats = hero.combat_record.defeats;
    Ok(stats)
}

fn slot_score(hero: &Hero, slot: EquipmentSlot) -> u32 {
    hero.equipped
        .get(slot)
        .map(|item| item.stats.attack + item.stats.defense + item.stats.health / 10)
        .unwrap_or(0)
}

/// Finish ready crafts, equip upgrades, queue the best affordable recipe and
/// spend leftover gold on enhancement.
fn tend_workshop(game: &mut Game, hero_id: &str, stats: &mut RunStats) -> GameResult<()> {
    let now = game.now();
    let hero = snapshot(game, hero_id)?;

    for queued in hero.crafting_queue.iter().filter(|item| item.is_complete(now)) {
        let item = game.finish_crafting(hero_id, &queued.id)?;
        stats.items_crafted += 1;
        let hero = snapshot(game, hero_id)?;
        let score = item.stats.attack + item.stats.defense + item.stats.health / 10;
        if score > slot_score(&hero, item.slot) {
            game.equip(hero_id, &item.id)?;
        }
    }

    let hero = snapshot(game, hero_id)?;
    if hero.crafting_queue.is_empty() {
        let best = RECIPES
            .iter()
            .filter(|recipe| hero.gold >= recipe.gold_cost)
            .filter(|recipe| hero.materials.shortfall(recipe.materials).is_none())
            .max_by_key(|recipe| recipe.gold_cost);
        if let Some(recipe) = best {
            game.start_crafting(hero_id, recipe.id)?;
        }
    }

    let hero = snapshot(game, hero_id)?;
    let cheapest = hero
        .equipped
        .iter_equipped()
        .filter(|item| item.enhance_level < MAX_ENHANCEMENT_LEVEL)
        .min_by_key(|item| item.enhance_level);
    if let Some(item) = cheapest {
        if hero.gold >= enhancement_cost(item.enhance_level) {
            game.enhance(hero_id, &item.id)?;
            stats.enhancements += 1;
        }
    }
    Ok(())
}
