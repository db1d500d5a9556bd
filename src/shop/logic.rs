use super::catalog::{find_shop_item, ShopCurrency, ShopItem, ShopReward};
use crate::character::Hero;
use crate::core::error::{Entity, GameError, GameResult, Resource};
use crate::items::{Equipment, Materials};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchasedReward {
    Equipment(Equipment),
    Materials(Materials),
    Gold(u64),
}

/// Receipt for a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub item_id: String,
    pub currency: ShopCurrency,
    pub cost: u64,
    pub reward: PurchasedReward,
}

fn balance(hero: &Hero, currency: ShopCurrency) -> u64 {
    match currency {
        ShopCurrency::Honor => hero.honor_points,
        ShopCurrency::Gold => hero.gold,
    }
}

fn grant(hero: &mut Hero, item: &ShopItem, now_ms: i64) -> PurchasedReward {
    match item.reward {
        ShopReward::Equipment {
            name,
            slot,
            rarity,
            stats,
        } => {
            let equipment = Equipment::new(name, slot, rarity, stats, item.cost, now_ms);
            hero.inventory.push(equipment.clone());
            PurchasedReward::Equipment(equipment)
        }
        ShopReward::Materials(pairs) => {
            let bundle = Materials::from_pairs(pairs);
            hero.materials.merge(&bundle);
            PurchasedReward::Materials(bundle)
        }
        ShopReward::Gold(amount) => {
            hero.gain_gold(amount);
            PurchasedReward::Gold(amount)
        }
    }
}

/// Buy a catalog item with its own currency.
///
/// Equipment lands in the inventory at +0 with its price as base value.
pub fn buy(hero: &mut Hero, item_id: &str, now_ms: i64) -> GameResult<Purchase> {
    let item = find_shop_item(item_id).ok_or_else(|| GameError::not_found(Entity::ShopItem, item_id))?;

    let available = balance(hero, item.currency);
    if available < item.cost {
        let resource = match item.currency {
            ShopCurrency::Honor => Resource::Honor,
            ShopCurrency::Gold => Resource::Gold,
        };
        return Err(GameError::insufficient(resource, item.cost, available));
    }

    match item.currency {
        ShopCurrency::Honor => hero.honor_points -= item.cost,
        ShopCurrency::Gold => hero.gold -= item.cost,
    }
    let reward = grant(hero, item, now_ms);

    Ok(Purchase {
        item_id: item.id.to_string(),
        currency: item.currency,
        cost: item.cost,
        reward,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::HeroClass;
    use crate::items::{MaterialKind, Rarity};

    fn hero() -> Hero {
        Hero::new("Aria", HeroClass::Guardian, 0).unwrap()
    }

    #[test]
    fn test_honor_equipment_goes_to_inventory() {
        let mut hero = hero();
        hero.honor_points = 600;
        let purchase = buy(&mut hero, "honor_sword", 50).unwrap();
        assert_eq!(hero.honor_points, 100);
        assert_eq!(purchase.currency, ShopCurrency::Honor);
        assert_eq!(hero.inventory.len(), 1);
        let blade = &hero.inventory[0];
        assert_eq!(blade.name, "Honor Blade");
        assert_eq!(blade.rarity, Rarity::Legendary);
        assert_eq!(blade.enhance_level, 0);
        assert_eq!(blade.acquired_at, 50);
    }

    #[test]
    fn test_material_bundle_merges() {
        let mut hero = hero();
        hero.honor_points = 300;
        let gems = hero.materials.get(MaterialKind::Gems);
        buy(&mut hero, "enhancement_stones", 0).unwrap();
        assert_eq!(hero.materials.get(MaterialKind::Gems), gems + 10);
        assert_eq!(hero.honor_points, 0);
    }

    #[test]
    fn test_gold_bag() {
        let mut hero = hero();
        hero.honor_points = 100;
        let purchase = buy(&mut hero, "gold_bag", 0).unwrap();
        assert_eq!(purchase.reward, PurchasedReward::Gold(1_000));
        assert_eq!(hero.gold, 1_100);
    }

    #[test]
    fn test_gold_item_spends_gold_not_honor() {
        let mut hero = hero();
        hero.gold = 150;
        hero.honor_points = 999;
        buy(&mut hero, "ore_crate", 0).unwrap();
        assert_eq!(hero.gold, 0);
        assert_eq!(hero.honor_points, 999);
    }

    #[test]
    fn test_insufficient_names_currency() {
        let mut hero = hero();
        let before = hero.clone();
        let err = buy(&mut hero, "honor_armor", 0).unwrap_err();
        assert_eq!(err, GameError::insufficient(Resource::Honor, 750, 0));
        let err = buy(&mut hero, "arena_gladius", 0).unwrap_err();
        assert_eq!(err, GameError::insufficient(Resource::Gold, 600, 100));
        assert_eq!(hero, before);
    }

    #[test]
    fn test_unknown_item() {
        let mut hero = hero();
        let err = buy(&mut hero, "honor_crown", 0).unwrap_err();
        assert_eq!(err, GameError::not_found(Entity::ShopItem, "honor_crown"));
    }
}
