//! The hero record and its creation rules.

use crate::core::balance::xp_for_next_level;
use crate::core::constants::*;
use crate::core::error::{GameError, GameResult};
use crate::items::{EquippedGear, Equipment, Materials};
use crate::workshop::CraftingItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attack, defense and health as one unit. Used for hero base stats,
/// equipment bonuses and generated combatants alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
}

impl StatBlock {
    pub const fn new(attack: u32, defense: u32, health: u32) -> Self {
        Self {
            attack,
            defense,
            health,
        }
    }

    pub fn saturating_add(self, other: StatBlock) -> StatBlock {
        StatBlock {
            attack: self.attack.saturating_add(other.attack),
            defense: self.defense.saturating_add(other.defense),
            health: self.health.saturating_add(other.health),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    Warrior,
    Guardian,
    Mage,
}

impl HeroClass {
    pub const ALL: [HeroClass; 3] = [HeroClass::Warrior, HeroClass::Guardian, HeroClass::Mage];

    pub fn name(&self) -> &'static str {
        match self {
            HeroClass::Warrior => "Warrior",
            HeroClass::Guardian => "Guardian",
            HeroClass::Mage => "Mage",
        }
    }

    /// Level 1 stats for the class.
    pub fn base_stats(&self) -> StatBlock {
        match self {
            HeroClass::Warrior => StatBlock::new(15, 10, 120),
            HeroClass::Guardian => StatBlock::new(10, 15, 150),
            HeroClass::Mage => StatBlock::new(18, 8, 100),
        }
    }
}

impl fmt::Display for HeroClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeroClass {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeroClass::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::InvalidArgument(format!("invalid hero class: {}", s)))
    }
}

/// Lifetime idle combat counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRecord {
    pub total_idle_seconds: u64,
    pub enemies_defeated: u64,
    pub total_experience: u64,
    pub total_gold: u64,
    pub defeats: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: String,
    pub name: String,
    pub class: HeroClass,
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub skill_points: u32,
    /// Class base plus level growth, without equipment.
    pub base_stats: StatBlock,
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
    pub current_health: u32,
    pub gold: u64,
    pub honor_points: u64,
    pub arena_rank: u32,
    pub inventory: Vec<Equipment>,
    pub equipped: EquippedGear,
    pub materials: Materials,
    pub crafting_queue: Vec<CraftingItem>,
    #[serde(default)]
    pub combat_record: CombatRecord,
    pub created_at: i64,
    pub last_active: i64,
}

impl Hero {
    /// Fresh level 1 hero with the standard starting kit.
    pub fn new(name: &str, class: HeroClass, now_ms: i64) -> GameResult<Self> {
        let name = validate_name(name)?;
        let base = class.base_stats();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            class,
            level: 1,
            experience: 0,
            experience_to_next: xp_for_next_level(1),
            skill_points: 0,
            base_stats: base,
            attack: base.attack,
            defense: base.defense,
            max_health: base.health,
            current_health: base.health,
            gold: STARTING_GOLD,
            honor_points: 0,
            arena_rank: STARTING_ARENA_RANK,
            inventory: Vec::new(),
            equipped: EquippedGear::new(),
            materials: Materials::starter_kit(),
            crafting_queue: Vec::new(),
            combat_record: CombatRecord::default(),
            created_at: now_ms,
            last_active: now_ms,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Current totals as a stat block.
    pub fn stats(&self) -> StatBlock {
        StatBlock::new(self.attack, self.defense, self.max_health)
    }

    pub fn find_inventory(&self, equipment_id: &str) -> Option<&Equipment> {
        self.inventory.iter().find(|item| item.id == equipment_id)
    }

    /// Look an item up wherever it lives: inventory first, then equipped slots.
    pub fn find_equipment_mut(&mut self, equipment_id: &str) -> Option<&mut Equipment> {
        if let Some(pos) = self.inventory.iter().position(|item| item.id == equipment_id) {
            return self.inventory.get_mut(pos);
        }
        self.equipped.find_mut(equipment_id)
    }
}

/// Trim and length-check a hero name.
pub fn validate_name(name: &str) -> GameResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GameError::InvalidArgument(
            "hero name cannot be empty".to_string(),
        ));
    }
    let length = trimmed.chars().count();
    if length > HERO_NAME_MAX_LENGTH {
        return Err(GameError::InvalidArgument(format!(
            "hero name is {} characters, maximum is {}",
            length, HERO_NAME_MAX_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Sanity predicate for externally supplied hero state.
///
/// Level within 1..=1000, health within max, attack and defense at least
/// twice the level, and a positive arena rank.
pub fn validate_hero(hero: &Hero) -> bool {
    if hero.level < 1 || hero.level > MAX_HERO_LEVEL {
        return false;
    }
    if hero.current_health > hero.max_health {
        return false;
    }
    let expected_min = hero.level.saturating_mul(2);
    if hero.attack < expected_min || hero.defense < expected_min {
        return false;
    }
    hero.arena_rank >= 1
}

/// Structural consistency of the level track: the threshold matches the
/// level and the experience sits below it.
pub fn check_progression(hero: &Hero) -> GameResult<()> {
    let expected = xp_for_next_level(hero.level);
    if hero.experience_to_next != expected {
        return Err(GameError::InvalidArgument(format!(
            "experience_to_next is {}, level {} needs {}",
            hero.experience_to_next, hero.level, expected
        )));
    }
    if hero.experience >= hero.experience_to_next {
        return Err(GameError::InvalidArgument(format!(
            "experience {} must be below {}",
            hero.experience, hero.experience_to_next
        )));
    }
    Ok(())
}

/// Fields a host may overwrite on an existing hero. Unset fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroPatch {
    pub name: Option<String>,
    pub level: Option<u32>,
    pub experience: Option<u64>,
    pub gold: Option<u64>,
    pub honor_points: Option<u64>,
    pub arena_rank: Option<u32>,
    pub current_health: Option<u32>,
    pub materials: Option<Materials>,
}

impl HeroPatch {
    /// Apply the patch to a copy of `hero`, leaving the original untouched.
    ///
    /// A level change rebuilds base stats from the class line so derived
    /// totals stay consistent with equipment.
    pub fn applied_to(&self, hero: &Hero) -> GameResult<Hero> {
        let mut next = hero.clone();
        if let Some(name) = &self.name {
            next.name = validate_name(name)?;
        }
        if let Some(level) = self.level {
            if level == 0 {
                return Err(GameError::InvalidArgument(
                    "level must be at least 1".to_string(),
                ));
            }
            next.level = level;
            next.experience_to_next = xp_for_next_level(level);
            next.base_stats = base_stats_for_level(hero.class, level);
            next.recalculate_stats();
        }
        if let Some(experience) = self.experience {
            if experience >= next.experience_to_next {
                return Err(GameError::InvalidArgument(format!(
                    "experience {} must be below {}",
                    experience, next.experience_to_next
                )));
            }
            next.experience = experience;
        }
        if let Some(gold) = self.gold {
            next.gold = gold;
        }
        if let Some(honor) = self.honor_points {
            next.honor_points = honor;
        }
        if let Some(rank) = self.arena_rank {
            next.arena_rank = rank;
        }
        if let Some(health) = self.current_health {
            next.current_health = health;
        }
        if let Some(materials) = &self.materials {
            next.materials = materials.clone();
        }
        check_progression(&next)?;
        Ok(next)
    }
}

/// Base stats of a class after growing to `level`.
pub fn base_stats_for_level(class: HeroClass, level: u32) -> StatBlock {
    let gained = level.saturating_sub(1);
    let base = class.base_stats();
    StatBlock::new(
        base.attack + gained * LEVEL_UP_ATTACK,
        base.defense + gained * LEVEL_UP_DEFENSE,
        base.health + gained * LEVEL_UP_HEALTH,
    )
}
