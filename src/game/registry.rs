//! Hero storage keyed by id.

use crate::character::Hero;
use crate::core::error::{Entity, GameError, GameResult};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct HeroRegistry {
    heroes: BTreeMap<String, Hero>,
}

impl HeroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a hero, replacing any record with the same id.
    pub fn insert(&mut self, hero: Hero) -> Option<Hero> {
        self.heroes.insert(hero.id.clone(), hero)
    }

    pub fn get(&self, id: &str) -> Option<&Hero> {
        self.heroes.get(id)
    }

    pub fn require(&self, id: &str) -> GameResult<&Hero> {
        self.heroes
            .get(id)
            .ok_or_else(|| GameError::not_found(Entity::Hero, id))
    }

    pub fn require_mut(&mut self, id: &str) -> GameResult<&mut Hero> {
        self.heroes
            .get_mut(id)
            .ok_or_else(|| GameError::not_found(Entity::Hero, id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.heroes.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.values()
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}
