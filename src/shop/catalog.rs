//! Static shop catalog: the honor shop and the gold arena shop.

use crate::character::StatBlock;
use crate::items::MaterialKind::{Crystals, Gems, IronOre, Leather, Wood};
use crate::items::{EquipmentSlot, MaterialKind, Rarity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopCurrency {
    Honor,
    Gold,
}

impl ShopCurrency {
    pub fn name(&self) -> &'static str {
        match self {
            ShopCurrency::Honor => "honor",
            ShopCurrency::Gold => "gold",
        }
    }
}

/// What a catalog entry hands over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopReward {
    /// A fresh +0 piece of equipment.
    Equipment {
        name: &'static str,
        slot: EquipmentSlot,
        rarity: Rarity,
        stats: StatBlock,
    },
    Materials(&'static [(MaterialKind, u32)]),
    Gold(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub currency: ShopCurrency,
    pub cost: u64,
    pub reward: ShopReward,
}

pub static SHOP_ITEMS: [ShopItem; 10] = [
    // Honor shop
    ShopItem {
        id: "honor_sword",
        name: "Honor Blade",
        description: "A legendary weapon forged from arena victories",
        currency: ShopCurrency::Honor,
        cost: 500,
        reward: ShopReward::Equipment {
            name: "Honor Blade",
            slot: EquipmentSlot::Weapon,
            rarity: Rarity::Legendary,
            stats: StatBlock::new(50, 8, 20),
        },
    },
    ShopItem {
        id: "honor_armor",
        name: "Champion's Plate",
        description: "Armor worn by arena champions",
        currency: ShopCurrency::Honor,
        cost: 750,
        reward: ShopReward::Equipment {
            name: "Champion's Plate",
            slot: EquipmentSlot::Armor,
            rarity: Rarity::Legendary,
            stats: StatBlock::new(8, 40, 100),
        },
    },
    ShopItem {
        id: "rare_materials",
        name: "Rare Material Pack",
        description: "A collection of rare crafting materials",
        currency: ShopCurrency::Honor,
        cost: 200,
        reward: ShopReward::Materials(&[(Crystals, 5), (Gems, 3), (IronOre, 10)]),
    },
    ShopItem {
        id: "gold_bag",
        name: "Bag of Gold",
        description: "A hefty bag containing 1000 gold",
        currency: ShopCurrency::Honor,
        cost: 100,
        reward: ShopReward::Gold(1_000),
    },
    ShopItem {
        id: "enhancement_stones",
        name: "Enhancement Stones",
        description: "Special stones that boost equipment enhancement",
        currency: ShopCurrency::Honor,
        cost: 300,
        reward: ShopReward::Materials(&[(Gems, 10), (Crystals, 15)]),
    },
    // Arena shop (gold)
    ShopItem {
        id: "arena_gladius",
        name: "Arena Gladius",
        description: "A short blade favored by ladder regulars",
        currency: ShopCurrency::Gold,
        cost: 600,
        reward: ShopReward::Equipment {
            name: "Arena Gladius",
            slot: EquipmentSlot::Weapon,
            rarity: Rarity::Rare,
            stats: StatBlock::new(22, 3, 0),
        },
    },
    ShopItem {
        id: "arena_hauberk",
        name: "Arena Hauberk",
        description: "Riveted mail sized for the pit",
        currency: ShopCurrency::Gold,
        cost: 550,
        reward: ShopReward::Equipment {
            name: "Arena Hauberk",
            slot: EquipmentSlot::Armor,
            rarity: Rarity::Rare,
            stats: StatBlock::new(2, 16, 40),
        },
    },
    ShopItem {
        id: "arena_bulwark",
        name: "Arena Bulwark",
        description: "A heavy round shield with a bronze rim",
        currency: ShopCurrency::Gold,
        cost: 500,
        reward: ShopReward::Equipment {
            name: "Arena Bulwark",
            slot: EquipmentSlot::Shield,
            rarity: Rarity::Rare,
            stats: StatBlock::new(1, 13, 30),
        },
    },
    ShopItem {
        id: "ore_crate",
        name: "Ore Crate",
        description: "Ten chunks of smelting-grade iron ore",
        currency: ShopCurrency::Gold,
        cost: 150,
        reward: ShopReward::Materials(&[(IronOre, 10)]),
    },
    ShopItem {
        id: "timber_bundle",
        name: "Timber Bundle",
        description: "Seasoned wood and tanned hides",
        currency: ShopCurrency::Gold,
        cost: 120,
        reward: ShopReward::Materials(&[(Wood, 10), (Leather, 5)]),
    },
];

pub fn find_shop_item(id: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}

/// Catalog entries sold for `currency`, in listing order.
pub fn items_for(currency: ShopCurrency) -> impl Iterator<Item = &'static ShopItem> {
    SHOP_ITEMS.iter().filter(move |item| item.currency == currency)
}
