//! Crafting, enhancement, equipment and shop operations on a registered hero.

use super::Game;
use crate::core::error::GameResult;
use crate::enhancement::{self, EnhanceOutcome};
use crate::items::{self, EquipOutcome, Equipment, EquipmentSlot};
use crate::shop::{self, Purchase};
use crate::workshop::{self, CraftingItem};
use log::{debug, info};

impl Game {
    // =========================================================================
    // WORKSHOP
    // =========================================================================

    /// Pay for a recipe and put it on the hero's crafting queue.
    pub fn start_crafting(&mut self, hero_id: &str, recipe_id: &str) -> GameResult<CraftingItem> {
        let now = self.now();
        let hero = self.registry.require_mut(hero_id)?;
        let item = workshop::start_crafting(hero, recipe_id, now)?;
        info!(
            "{} started crafting {} (ready at {})",
            hero.name, item.item_name, item.completes_at
        );
        Ok(item)
    }

    /// Collect a finished craft into the inventory.
    pub fn finish_crafting(&mut self, hero_id: &str, crafting_id: &str) -> GameResult<Equipment> {
        let now = self.now();
        let hero = self.registry.require_mut(hero_id)?;
        let equipment = workshop::finish_crafting(hero, crafting_id, now)?;
        info!("{} crafted {}", hero.name, equipment.name);
        Ok(equipment)
    }

    /// Spend gold to make a queued craft ready now. Returns the gold spent.
    pub fn skip_crafting(&mut self, hero_id: &str, crafting_id: &str) -> GameResult<u64> {
        let now = self.now();
        let hero = self.registry.require_mut(hero_id)?;
        let cost = workshop::skip_crafting(hero, crafting_id, now)?;
        debug!("{} skipped craft {} for {} gold", hero.name, crafting_id, cost);
        Ok(cost)
    }

    // =========================================================================
    // GEAR
    // =========================================================================

    pub fn enhance(&mut self, hero_id: &str, equipment_id: &str) -> GameResult<EnhanceOutcome> {
        let hero = self.registry.require_mut(hero_id)?;
        let outcome = enhancement::enhance(hero, equipment_id)?;
        info!(
            "{} enhanced {} for {} gold",
            hero.name,
            outcome.equipment.display_name(),
            outcome.cost
        );
        Ok(outcome)
    }

    pub fn equip(&mut self, hero_id: &str, equipment_id: &str) -> GameResult<EquipOutcome> {
        let hero = self.registry.require_mut(hero_id)?;
        let outcome = items::equip(hero, equipment_id)?;
        debug!("{} equipped {}", hero.name, outcome.equipped.name);
        Ok(outcome)
    }

    pub fn unequip(&mut self, hero_id: &str, slot: EquipmentSlot) -> GameResult<Equipment> {
        let hero = self.registry.require_mut(hero_id)?;
        let item = items::unequip(hero, slot)?;
        debug!("{} unequipped {}", hero.name, item.name);
        Ok(item)
    }

    // =========================================================================
    // SHOP
    // =========================================================================

    /// Buy a catalog item with honor or gold, whichever it is priced in.
    pub fn buy(&mut self, hero_id: &str, item_id: &str) -> GameResult<Purchase> {
        let now = self.now();
        let hero = self.registry.require_mut(hero_id)?;
        let purchase = shop::buy(hero, item_id, now)?;
        info!(
            "{} bought {} for {} {}",
            hero.name,
            purchase.item_id,
            purchase.cost,
            purchase.currency.name()
        );
        Ok(purchase)
    }
}
