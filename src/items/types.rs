use crate::character::StatBlock;
use crate::core::balance;
use crate::enhancement::enhancement_prefix;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Shield,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 3] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Shield,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
            EquipmentSlot::Shield => "shield",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
    Legendary = 3,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// A single piece of gear owned by a hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub enhance_level: u8,
    /// Bonuses granted while equipped, including enhancement growth.
    pub stats: StatBlock,
    /// Gold worth before rarity and enhancement scaling.
    pub base_value: u64,
    pub acquired_at: i64,
}

impl Equipment {
    pub fn new(
        name: impl Into<String>,
        slot: EquipmentSlot,
        rarity: Rarity,
        stats: StatBlock,
        base_value: u64,
        acquired_at: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            slot,
            rarity,
            enhance_level: 0,
            stats,
            base_value,
            acquired_at,
        }
    }

    /// Name with enhancement prefix, e.g. "+3 Iron Sword".
    pub fn display_name(&self) -> String {
        format!("{}{}", enhancement_prefix(self.enhance_level), self.name)
    }

    pub fn sell_value(&self) -> u64 {
        balance::sell_value(self.base_value, self.rarity, self.enhance_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Equipment {
        Equipment::new(
            "Iron Sword",
            EquipmentSlot::Weapon,
            Rarity::Common,
            StatBlock::new(12, 0, 0),
            100,
            0,
        )
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_new_equipment_starts_unenhanced_with_unique_id() {
        let a = sword();
        let b = sword();
        assert_eq!(a.enhance_level, 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_display_name_prefix() {
        let mut item = sword();
        assert_eq!(item.display_name(), "Iron Sword");
        item.enhance_level = 3;
        assert_eq!(item.display_name(), "+3 Iron Sword");
    }

    #[test]
    fn test_sell_value_uses_rarity() {
        let item = sword();
        assert_eq!(item.sell_value(), 30);
    }
}
