//! Crafting queue: start, finish and skip.

use super::recipes::{find_recipe, Recipe};
use crate::character::Hero;
use crate::core::constants::{MS_PER_SECOND, SKIP_GOLD_PER_SECOND};
use crate::core::error::{Entity, GameError, GameResult, Precondition, Resource};
use crate::items::Equipment;
use serde::{Deserialize, Serialize};

/// A recipe in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingItem {
    pub id: String,
    pub recipe_id: String,
    pub item_name: String,
    pub started_at: i64,
    pub completes_at: i64,
}

impl CraftingItem {
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        (self.completes_at - now_ms).max(0)
    }

    pub fn is_complete(&self, now_ms: i64) -> bool {
        self.completes_at <= now_ms
    }
}

/// Gold to finish a craft immediately: 10 per started second remaining.
pub fn skip_cost(remaining_ms: i64) -> u64 {
    let remaining_ms = remaining_ms.max(0);
    let seconds = (remaining_ms + MS_PER_SECOND - 1) / MS_PER_SECOND;
    seconds as u64 * SKIP_GOLD_PER_SECOND
}

fn lookup(recipe_id: &str) -> GameResult<&'static Recipe> {
    find_recipe(recipe_id).ok_or_else(|| GameError::not_found(Entity::Recipe, recipe_id))
}

/// Pay for a recipe and queue it. Gold and every material are checked
/// before anything is deducted.
pub fn start_crafting(hero: &mut Hero, recipe_id: &str, now_ms: i64) -> GameResult<CraftingItem> {
    let recipe = lookup(recipe_id)?;

    if hero.gold < recipe.gold_cost {
        return Err(GameError::insufficient(
            Resource::Gold,
            recipe.gold_cost,
            hero.gold,
        ));
    }
    if let Some((kind, needed, available)) = hero.materials.shortfall(recipe.materials) {
        return Err(GameError::insufficient(
            Resource::Material(kind),
            needed as u64,
            available as u64,
        ));
    }

    hero.gold -= recipe.gold_cost;
    hero.materials.remove_all(recipe.materials);

    let item = CraftingItem {
        id: uuid::Uuid::new_v4().to_string(),
        recipe_id: recipe.id.to_string(),
        item_name: recipe.name.to_string(),
        started_at: now_ms,
        completes_at: now_ms + recipe.craft_time_ms,
    };
    hero.crafting_queue.push(item.clone());
    Ok(item)
}

fn queue_position(hero: &Hero, crafting_id: &str) -> GameResult<usize> {
    hero.crafting_queue
        .iter()
        .position(|item| item.id == crafting_id)
        .ok_or_else(|| GameError::not_found(Entity::CraftingItem, crafting_id))
}

/// Claim a completed craft as a fresh +0 item in the inventory.
pub fn finish_crafting(hero: &mut Hero, crafting_id: &str, now_ms: i64) -> GameResult<Equipment> {
    let pos = queue_position(hero, crafting_id)?;
    let queued = &hero.crafting_queue[pos];
    if !queued.is_complete(now_ms) {
        return Err(Precondition::CraftingNotFinished {
            remaining_ms: queued.remaining_ms(now_ms),
        }
        .into());
    }
    let recipe = lookup(&queued.recipe_id)?;

    let equipment = Equipment::new(
        recipe.name,
        recipe.slot,
        recipe.rarity,
        recipe.stats,
        recipe.gold_cost,
        now_ms,
    );
    hero.crafting_queue.remove(pos);
    hero.inventory.push(equipment.clone());
    Ok(equipment)
}

/// Pay gold to complete a craft now. Returns the gold spent; an item that
/// is already done costs nothing.
pub fn skip_crafting(hero: &mut Hero, crafting_id: &str, now_ms: i64) -> GameResult<u64> {
    let pos = queue_position(hero, crafting_id)?;
    let cost = skip_cost(hero.crafting_queue[pos].remaining_ms(now_ms));
    hero.try_spend_gold(cost)?;

    let queued = &mut hero.crafting_queue[pos];
    queued.completes_at = queued.completes_at.min(now_ms);
    Ok(cost)
}
