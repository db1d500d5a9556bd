use super::types::{EquipmentSlot, Equipment};
use crate::character::{Hero, StatBlock};
use crate::core::error::{Entity, GameError, GameResult};
use serde::{Deserialize, Serialize};

/// What the hero is wearing, one optional item per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedGear {
    #[serde(default)]
    pub weapon: Option<Equipment>,
    #[serde(default)]
    pub armor: Option<Equipment>,
    #[serde(default)]
    pub shield: Option<Equipment>,
}

impl EquippedGear {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Equipment> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Shield => self.shield.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Equipment> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Shield => &mut self.shield,
        }
    }

    /// Put `item` in its slot, returning whatever was there.
    pub fn set(&mut self, item: Equipment) -> Option<Equipment> {
        self.slot_mut(item.slot).replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Equipment> {
        self.slot_mut(slot).take()
    }

    pub fn find_mut(&mut self, equipment_id: &str) -> Option<&mut Equipment> {
        [&mut self.weapon, &mut self.armor, &mut self.shield]
            .into_iter()
            .filter_map(|item| item.as_mut())
            .find(|item| item.id == equipment_id)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Equipment> {
        [&self.weapon, &self.armor, &self.shield]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    /// Sum of every equipped item's bonuses.
    pub fn total_bonus(&self) -> StatBlock {
        self.iter_equipped()
            .fold(StatBlock::default(), |acc, item| acc.saturating_add(item.stats))
    }
}

/// Result of equipping an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipOutcome {
    pub equipped: Equipment,
    /// Item displaced from the slot, now back in the inventory.
    pub unequipped: Option<Equipment>,
}

/// Move an inventory item into its slot. Any displaced item goes back to
/// the inventory and stats are rebuilt from base plus equipped bonuses.
pub fn equip(hero: &mut Hero, equipment_id: &str) -> GameResult<EquipOutcome> {
    let pos = hero
        .inventory
        .iter()
        .position(|item| item.id == equipment_id)
        .ok_or_else(|| GameError::not_found(Entity::Equipment, equipment_id))?;

    let item = hero.inventory.remove(pos);
    let equipped = item.clone();
    let unequipped = hero.equipped.set(item);
    if let Some(previous) = &unequipped {
        hero.inventory.push(previous.clone());
    }
    hero.recalculate_stats();

    Ok(EquipOutcome {
        equipped,
        unequipped,
    })
}

/// Move whatever occupies `slot` back to the inventory.
pub fn unequip(hero: &mut Hero, slot: EquipmentSlot) -> GameResult<Equipment> {
    let item = hero.equipped.take(slot).ok_or_else(|| {
        GameError::InvalidArgument(format!("no item equipped in the {} slot", slot.name()))
    })?;
    hero.inventory.push(item.clone());
    hero.recalculate_stats();
    Ok(item)
}
