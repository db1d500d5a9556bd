//! Craftable equipment recipes.

use crate::character::StatBlock;
use crate::items::{EquipmentSlot, MaterialKind, Rarity};
use crate::items::MaterialKind::{Cloth, Crystals, Gems, IronOre, Leather, Wood};

/// A static recipe definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub id: &'static str,
    pub name: &'static str,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub craft_time_ms: i64,
    pub gold_cost: u64,
    pub materials: &'static [(MaterialKind, u32)],
    pub stats: StatBlock,
}

pub static RECIPES: [Recipe; 9] = [
    // Weapons
    Recipe {
        id: "iron_sword",
        name: "Iron Sword",
        slot: EquipmentSlot::Weapon,
        rarity: Rarity::Common,
        craft_time_ms: 30_000,
        gold_cost: 100,
        materials: &[(IronOre, 3), (Wood, 1)],
        stats: StatBlock::new(12, 0, 0),
    },
    Recipe {
        id: "steel_blade",
        name: "Steel Blade",
        slot: EquipmentSlot::Weapon,
        rarity: Rarity::Rare,
        craft_time_ms: 60_000,
        gold_cost: 250,
        materials: &[(IronOre, 5), (Crystals, 1)],
        stats: StatBlock::new(20, 2, 0),
    },
    Recipe {
        id: "enchanted_sword",
        name: "Enchanted Sword",
        slot: EquipmentSlot::Weapon,
        rarity: Rarity::Epic,
        craft_time_ms: 120_000,
        gold_cost: 500,
        materials: &[(IronOre, 8), (Crystals, 3), (Gems, 1)],
        stats: StatBlock::new(35, 5, 10),
    },
    // Armor
    Recipe {
        id: "leather_armor",
        name: "Leather Armor",
        slot: EquipmentSlot::Armor,
        rarity: Rarity::Common,
        craft_time_ms: 45_000,
        gold_cost: 80,
        materials: &[(Leather, 4), (Cloth, 2)],
        stats: StatBlock::new(0, 8, 20),
    },
    Recipe {
        id: "chain_mail",
        name: "Chain Mail",
        slot: EquipmentSlot::Armor,
        rarity: Rarity::Rare,
        craft_time_ms: 90_000,
        gold_cost: 200,
        materials: &[(IronOre, 6), (Leather, 2)],
        stats: StatBlock::new(2, 15, 35),
    },
    Recipe {
        id: "plate_armor",
        name: "Plate Armor",
        slot: EquipmentSlot::Armor,
        rarity: Rarity::Epic,
        craft_time_ms: 180_000,
        gold_cost: 450,
        materials: &[(IronOre, 10), (Crystals, 2), (Leather, 3)],
        stats: StatBlock::new(5, 25, 60),
    },
    // Shields
    Recipe {
        id: "wooden_shield",
        name: "Wooden Shield",
        slot: EquipmentSlot::Shield,
        rarity: Rarity::Common,
        craft_time_ms: 20_000,
        gold_cost: 60,
        materials: &[(Wood, 3), (Leather, 1)],
        stats: StatBlock::new(0, 6, 15),
    },
    Recipe {
        id: "iron_shield",
        name: "Iron Shield",
        slot: EquipmentSlot::Shield,
        rarity: Rarity::Rare,
        craft_time_ms: 75_000,
        gold_cost: 180,
        materials: &[(IronOre, 4), (Wood, 2)],
        stats: StatBlock::new(1, 12, 25),
    },
    Recipe {
        id: "crystal_shield",
        name: "Crystal Shield",
        slot: EquipmentSlot::Shield,
        rarity: Rarity::Epic,
        craft_time_ms: 150_000,
        gold_cost: 400,
        materials: &[(Crystals, 4), (IronOre, 3), (Gems, 1)],
        stats: StatBlock::new(3, 20, 40),
    },
];

pub fn find_recipe(id: &str) -> Option<&'static Recipe> {
    RECIPES.iter().find(|recipe| recipe.id == id)
}
