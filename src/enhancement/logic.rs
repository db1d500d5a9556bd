use super::types::*;
use crate::character::Hero;
use crate::core::error::{Entity, GameError, GameResult, Precondition, Resource};
use crate::items::Equipment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceOutcome {
    pub equipment: Equipment,
    pub cost: u64,
}

/// Raise an item one enhancement level for gold.
///
/// The item may sit in the inventory or in an equipped slot; equipped
/// items refresh the hero's totals immediately.
pub fn enhance(hero: &mut Hero, equipment_id: &str) -> GameResult<EnhanceOutcome> {
    let gold = hero.gold;
    let item = hero
        .find_equipment_mut(equipment_id)
        .ok_or_else(|| GameError::not_found(Entity::Equipment, equipment_id))?;

    if item.enhance_level >= MAX_ENHANCEMENT_LEVEL {
        return Err(Precondition::MaxEnhancement {
            max: MAX_ENHANCEMENT_LEVEL,
        }
        .into());
    }
    let cost = enhancement_cost(item.enhance_level);
    if gold < cost {
        return Err(GameError::insufficient(Resource::Gold, cost, gold));
    }

    item.enhance_level += 1;
    item.stats = item.stats.saturating_add(ENHANCEMENT_STEP);
    let equipment = item.clone();

    hero.gold -= cost;
    hero.recalculate_stats();

    Ok(EnhanceOutcome { equipment, cost })
}
