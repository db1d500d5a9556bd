//! JSON export and import of hero records.

use super::Game;
use crate::character::{check_progression, validate_hero, Hero};
use crate::core::error::{GameError, GameResult};
use log::info;

impl Game {
    /// Pretty-printed JSON snapshot of one hero.
    pub fn export_hero(&self, hero_id: &str) -> GameResult<String> {
        let hero = self.registry.require(hero_id)?;
        serde_json::to_string_pretty(hero)
            .map_err(|e| GameError::InvalidArgument(format!("cannot serialize hero: {}", e)))
    }

    /// Load a hero from JSON, replacing any hero with the same id.
    ///
    /// Records that fail to parse or fail `validate_hero` are rejected and
    /// nothing is stored.
    pub fn import_hero(&mut self, json: &str) -> GameResult<Hero> {
        let hero: Hero = serde_json::from_str(json)
            .map_err(|e| GameError::InvalidArgument(format!("malformed hero record: {}", e)))?;
        if !validate_hero(&hero) {
            return Err(GameError::InvalidArgument(format!(
                "hero record {} fails validation",
                hero.id
            )));
        }
        check_progression(&hero)?;
        let replaced = self.registry.insert(hero.clone()).is_some();
        info!(
            "imported {} ({}){}",
            hero.name,
            hero.id,
            if replaced { ", replacing existing record" } else { "" }
        );
        Ok(hero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::HeroClass;
    use crate::core::config::GameConfig;
    use crate::core::rng::ScriptedRolls;

    fn game() -> Game {
        Game::with_rng(GameConfig::default(), 0, ScriptedRolls::new([]))
    }

    #[test]
    fn test_export_import_into_fresh_game() {
        let mut source = game();
        let hero = source.create_hero("Aria", HeroClass::Guardian).unwrap();
        source.start_crafting(&hero.id, "wooden_shield").unwrap();
        let json = source.export_hero(&hero.id).unwrap();

        let mut target = game();
        let imported = target.import_hero(&json).unwrap();
        assert_eq!(&imported, source.hero(&hero.id).unwrap());
        assert_eq!(target.hero(&hero.id).unwrap().crafting_queue.len(), 1);
    }

    #[test]
    fn test_import_rejects_garbage() {
        let mut game = game();
        assert!(matches!(
            game.import_hero("{not json"),
            Err(GameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_import_rejects_invalid_hero() {
        let mut game = game();
        let mut hero = Hero::new("Aria", HeroClass::Mage, 0).unwrap();
        hero.arena_rank = 0;
        let json = serde_json::to_string(&hero).unwrap();
        assert!(game.import_hero(&json).is_err());
        assert!(game.hero(&hero.id).is_none());
    }

    #[test]
    fn test_import_rejects_broken_level_track() {
        let mut game = game();
        let mut hero = Hero::new("Aria", HeroClass::Mage, 0).unwrap();
        hero.experience = 5_000;
        hero.experience_to_next = 7;
        let json = serde_json::to_string(&hero).unwrap();
        assert!(matches!(
            game.import_hero(&json),
            Err(GameError::InvalidArgument(_))
        ));

        hero.experience_to_next = 100;
        let json = serde_json::to_string(&hero).unwrap();
        assert!(game.import_hero(&json).is_err());
        assert!(game.hero(&hero.id).is_none());
    }

    #[test]
    fn test_export_unknown_hero() {
        assert!(matches!(
            game().export_hero("nobody"),
            Err(GameError::NotFound { .. })
        ));
    }
}
