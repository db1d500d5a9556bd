//! Crafting materials and the per-hero material bag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialKind {
    IronOre,
    Leather,
    Cloth,
    Wood,
    Crystals,
    Gems,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 6] = [
        MaterialKind::IronOre,
        MaterialKind::Leather,
        MaterialKind::Cloth,
        MaterialKind::Wood,
        MaterialKind::Crystals,
        MaterialKind::Gems,
    ];

    /// Human-readable name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            MaterialKind::IronOre => "iron ore",
            MaterialKind::Leather => "leather",
            MaterialKind::Cloth => "cloth",
            MaterialKind::Wood => "wood",
            MaterialKind::Crystals => "crystals",
            MaterialKind::Gems => "gems",
        }
    }

    /// Identifier used in saves and recipes.
    pub fn key(&self) -> &'static str {
        match self {
            MaterialKind::IronOre => "ironOre",
            MaterialKind::Leather => "leather",
            MaterialKind::Cloth => "cloth",
            MaterialKind::Wood => "wood",
            MaterialKind::Crystals => "crystals",
            MaterialKind::Gems => "gems",
        }
    }
}

impl FromStr for MaterialKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| format!("unknown material: {}", s))
    }
}

/// Quantities keyed by kind. Kinds at zero may or may not be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Materials(BTreeMap<MaterialKind, u32>);

impl Materials {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_pairs(pairs: &[(MaterialKind, u32)]) -> Self {
        let mut bag = Self::new();
        for &(kind, quantity) in pairs {
            bag.add(kind, quantity);
        }
        bag
    }

    /// Materials every new hero starts with.
    pub fn starter_kit() -> Self {
        Self::from_pairs(&[
            (MaterialKind::IronOre, 10),
            (MaterialKind::Leather, 8),
            (MaterialKind::Cloth, 5),
            (MaterialKind::Wood, 12),
            (MaterialKind::Crystals, 2),
            (MaterialKind::Gems, 1),
        ])
    }

    pub fn get(&self, kind: MaterialKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    pub fn add(&mut self, kind: MaterialKind, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let entry = self.0.entry(kind).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    pub fn merge(&mut self, other: &Materials) {
        for (kind, quantity) in other.iter() {
            self.add(kind, quantity);
        }
    }

    /// First requirement this bag cannot cover, as (kind, needed, available).
    pub fn shortfall(&self, requirements: &[(MaterialKind, u32)]) -> Option<(MaterialKind, u32, u32)> {
        requirements
            .iter()
            .find(|(kind, needed)| self.get(*kind) < *needed)
            .map(|&(kind, needed)| (kind, needed, self.get(kind)))
    }

    /// Remove every requirement. Caller checks `shortfall` first; anything
    /// short is clamped at zero and emptied kinds are dropped.
    pub fn remove_all(&mut self, requirements: &[(MaterialKind, u32)]) {
        for &(kind, needed) in requirements {
            if let Some(quantity) = self.0.get_mut(&kind) {
                *quantity = quantity.saturating_sub(needed);
            }
        }
        self.0.retain(|_, quantity| *quantity > 0);
    }

    /// Copy with every quantity multiplied and floored.
    pub fn scaled(&self, multiplier: f64) -> Materials {
        let mut bag = Materials::new();
        for (kind, quantity) in self.iter() {
            bag.add(kind, (quantity as f64 * multiplier).floor() as u32);
        }
        bag
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialKind, u32)> + '_ {
        self.0.iter().map(|(kind, quantity)| (*kind, *quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|quantity| *quantity == 0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|quantity| *quantity as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_kit() {
        let kit = Materials::starter_kit();
        assert_eq!(kit.get(MaterialKind::IronOre), 10);
        assert_eq!(kit.get(MaterialKind::Leather), 8);
        assert_eq!(kit.get(MaterialKind::Cloth), 5);
        assert_eq!(kit.get(MaterialKind::Wood), 12);
        assert_eq!(kit.get(MaterialKind::Crystals), 2);
        assert_eq!(kit.get(MaterialKind::Gems), 1);
        assert_eq!(kit.total(), 38);
    }

    #[test]
    fn test_shortfall_names_first_missing_kind() {
        let bag = Materials::from_pairs(&[(MaterialKind::IronOre, 3), (MaterialKind::Wood, 0)]);
        let needs = [(MaterialKind::IronOre, 3), (MaterialKind::Wood, 1)];
        assert_eq!(bag.shortfall(&needs), Some((MaterialKind::Wood, 1, 0)));
        assert_eq!(bag.shortfall(&needs[..1]), None);
    }

    #[test]
    fn test_remove_all_leaves_zero() {
        let mut bag = Materials::from_pairs(&[(MaterialKind::IronOre, 3), (MaterialKind::Wood, 1)]);
        bag.remove_all(&[(MaterialKind::IronOre, 3), (MaterialKind::Wood, 1)]);
        assert_eq!(bag.get(MaterialKind::IronOre), 0);
        assert_eq!(bag.get(MaterialKind::Wood), 0);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_scaled_floors_each_quantity() {
        let bag = Materials::from_pairs(&[(MaterialKind::Cloth, 3)]);
        assert_eq!(bag.scaled(2.0).get(MaterialKind::Cloth), 6);
        assert_eq!(bag.scaled(0.5).get(MaterialKind::Cloth), 1);
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let bag = Materials::from_pairs(&[(MaterialKind::IronOre, 2)]);
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"{"ironOre":2}"#);
        let back: Materials = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bag);
    }

    #[test]
    fn test_parse_material_key() {
        assert_eq!("ironOre".parse::<MaterialKind>(), Ok(MaterialKind::IronOre));
        assert!("mithril".parse::<MaterialKind>().is_err());
    }
}
