use serde::{Deserialize, Serialize};

use crate::character::StatBlock;
use crate::core::config::RewardScheme;
use crate::core::constants::*;
use crate::core::rng::RandomSource;
use crate::items::{MaterialKind, Materials};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Monster,
    Undead,
    Beast,
    Human,
    Magic,
    Construct,
    Demon,
    Elemental,
}

/// A row in an enemy table.
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,
    pub kind: EnemyKind,
    pub multiplier: f64,
}

/// Enemies met by the idle loop under the flat reward scheme.
pub static IDLE_ARCHETYPES: [Archetype; 7] = [
    Archetype {
        name: "Goblin",
        kind: EnemyKind::Monster,
        multiplier: 0.8,
    },
    Archetype {
        name: "Orc",
        kind: EnemyKind::Monster,
        multiplier: 1.0,
    },
    Archetype {
        name: "Skeleton",
        kind: EnemyKind::Undead,
        multiplier: 0.9,
    },
    Archetype {
        name: "Wolf",
        kind: EnemyKind::Beast,
        multiplier: 0.7,
    },
    Archetype {
        name: "Bandit",
        kind: EnemyKind::Human,
        multiplier: 1.1,
    },
    Archetype {
        name: "Troll",
        kind: EnemyKind::Monster,
        multiplier: 1.3,
    },
    Archetype {
        name: "Dark Mage",
        kind: EnemyKind::Magic,
        multiplier: 1.2,
    },
];

/// Enemies used by the level-scaled scheme.
pub static SCALED_ARCHETYPES: [Archetype; 10] = [
    Archetype {
        name: "Goblin Scout",
        kind: EnemyKind::Monster,
        multiplier: 0.7,
    },
    Archetype {
        name: "Orc Warrior",
        kind: EnemyKind::Monster,
        multiplier: 1.0,
    },
    Archetype {
        name: "Skeleton Archer",
        kind: EnemyKind::Undead,
        multiplier: 0.8,
    },
    Archetype {
        name: "Forest Wolf",
        kind: EnemyKind::Beast,
        multiplier: 0.6,
    },
    Archetype {
        name: "Bandit Rogue",
        kind: EnemyKind::Human,
        multiplier: 1.1,
    },
    Archetype {
        name: "Cave Troll",
        kind: EnemyKind::Monster,
        multiplier: 1.4,
    },
    Archetype {
        name: "Dark Cultist",
        kind: EnemyKind::Magic,
        multiplier: 1.2,
    },
    Archetype {
        name: "Stone Golem",
        kind: EnemyKind::Construct,
        multiplier: 1.3,
    },
    Archetype {
        name: "Fire Imp",
        kind: EnemyKind::Demon,
        multiplier: 0.9,
    },
    Archetype {
        name: "Ice Elemental",
        kind: EnemyKind::Elemental,
        multiplier: 1.1,
    },
];

/// Kinds an enemy can drop.
pub const DROP_MATERIALS: [MaterialKind; 4] = [
    MaterialKind::IronOre,
    MaterialKind::Leather,
    MaterialKind::Cloth,
    MaterialKind::Wood,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyRewards {
    pub experience: u64,
    pub gold: u64,
    /// One unit of this material, if the drop roll hit.
    pub material: Option<MaterialKind>,
}

impl EnemyRewards {
    pub fn materials(&self) -> Materials {
        let mut bag = Materials::new();
        if let Some(kind) = self.material {
            bag.add(kind, 1);
        }
        bag
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    /// Display name including level, e.g. "Orc (Lv.3)".
    pub name: String,
    pub level: u32,
    pub kind: EnemyKind,
    pub max_health: u32,
    pub current_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub rewards: EnemyRewards,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_health = self.current_health.saturating_sub(amount);
    }

    pub fn stats(&self) -> StatBlock {
        StatBlock::new(self.attack, self.defense, self.max_health)
    }
}

fn scaled_line(line: (u32, u32), level: u32, multiplier: f64) -> u32 {
    ((line.0 + line.1 * level) as f64 * multiplier).floor() as u32
}

/// Roll an enemy near `hero_level`.
///
/// Draw order: archetype, level offset, drop chance, drop kind.
pub fn generate_enemy(hero_level: u32, scheme: RewardScheme, rng: &mut dyn RandomSource) -> Enemy {
    let (table, variance, health, attack, defense) = match scheme {
        RewardScheme::Flat => (
            &IDLE_ARCHETYPES[..],
            1_i64,
            IDLE_ENEMY_HEALTH,
            IDLE_ENEMY_ATTACK,
            IDLE_ENEMY_DEFENSE,
        ),
        RewardScheme::LevelScaled => (
            &SCALED_ARCHETYPES[..],
            2,
            SCALED_ENEMY_HEALTH,
            SCALED_ENEMY_ATTACK,
            SCALED_ENEMY_DEFENSE,
        ),
    };

    let template = table[rng.pick_index(table.len())];
    let level = (hero_level as i64 + rng.int_between(-variance, variance)).max(1) as u32;
    let multiplier = template.multiplier;

    let (experience, gold, drop_chance) = match scheme {
        RewardScheme::Flat => (
            IDLE_ENEMY_EXPERIENCE,
            IDLE_ENEMY_GOLD,
            IDLE_MATERIAL_DROP_CHANCE,
        ),
        RewardScheme::LevelScaled => (
            scaled_line(SCALED_ENEMY_EXPERIENCE, level, multiplier) as u64,
            scaled_line(SCALED_ENEMY_GOLD, level, multiplier) as u64,
            SCALED_MATERIAL_DROP_CHANCE,
        ),
    };
    let material = if rng.chance(drop_chance) {
        Some(DROP_MATERIALS[rng.pick_index(DROP_MATERIALS.len())])
    } else {
        None
    };

    let max_health = scaled_line(health, level, multiplier).max(1);
    Enemy {
        id: uuid::Uuid::new_v4().to_string(),
        name: format!("{} (Lv.{})", template.name, level),
        level,
        kind: template.kind,
        max_health,
        current_health: max_health,
        attack: scaled_line(attack, level, multiplier),
        defense: scaled_line(defense, level, multiplier),
        rewards: EnemyRewards {
            experience,
            gold,
            material,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Damage,
    Victory,
    Defeat,
    Heal,
    LevelUp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub kind: LogKind,
    pub message: String,
    pub at_ms: i64,
}

/// Most recent combat messages, oldest evicted first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: VecDeque<CombatLogEntry>,
    capacity: usize,
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::with_capacity(COMBAT_LOG_CAPACITY)
    }
}

impl CombatLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, kind: LogKind, message: String, at_ms: i64) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(CombatLogEntry {
            kind,
            message,
            at_ms,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&CombatLogEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter()
    }
}
