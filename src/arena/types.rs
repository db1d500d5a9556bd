use crate::character::{HeroClass, StatBlock};
use crate::core::balance::{power_rating, win_probability};
use serde::{Deserialize, Serialize};

/// Names drawn for generated arena opponents.
pub const OPPONENT_NAMES: [&str; 12] = [
    "Shadow Warrior",
    "Iron Knight",
    "Flame Mage",
    "Storm Guardian",
    "Crystal Hunter",
    "Dark Paladin",
    "Wind Assassin",
    "Earth Shaman",
    "Lightning Archer",
    "Frost Berserker",
    "Void Sorcerer",
    "Blood Champion",
];

/// Names used for synthetic leaderboard entries.
pub const LEADERBOARD_NAMES: [&str; 10] = [
    "DragonSlayer",
    "ShadowMaster",
    "IronLord",
    "StormKing",
    "FlameEmperor",
    "CrystalGuard",
    "VoidHunter",
    "ThunderGod",
    "FrostQueen",
    "BloodKnight",
];

/// Combat strength used to decide arena battles.
pub fn battle_power(stats: &StatBlock) -> f64 {
    stats.attack as f64 + stats.defense as f64 + stats.health as f64 / 10.0
}

/// Title for a ladder position.
pub fn rank_title(rank: u32) -> &'static str {
    match rank {
        0..=100 => "Champion",
        101..=500 => "Master",
        501..=1000 => "Expert",
        1001..=2000 => "Veteran",
        _ => "Novice",
    }
}

/// A generated arena opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaOpponent {
    pub id: String,
    pub name: String,
    pub class: HeroClass,
    pub level: u32,
    pub rank: u32,
    pub stats: StatBlock,
}

impl ArenaOpponent {
    pub fn battle_power(&self) -> f64 {
        battle_power(&self.stats)
    }

    /// Rough odds for display only. Battles are decided by jittered power.
    pub fn preview_win_probability(&self, hero_stats: &StatBlock) -> f64 {
        win_probability(power_rating(hero_stats), power_rating(&self.stats))
    }
}

/// A battle waiting for its resolution delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingBattle {
    pub hero_id: String,
    pub opponent: ArenaOpponent,
    /// Preview odds when the battle was locked in.
    pub win_chance: f64,
    pub started_at: i64,
    pub resolves_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub victory: bool,
    pub opponent_name: String,
    pub opponent_rank: u32,
    /// Signed; negative on a loss.
    pub honor_gained: i64,
    /// Signed; positive means the rank number dropped.
    pub rank_change: i64,
    pub experience_gained: u64,
    pub levels_gained: u32,
    pub new_rank: u32,
    pub new_honor: u64,
}

/// Arena state kept per hero between calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArenaState {
    pub opponent: Option<ArenaOpponent>,
    pub battle: Option<PendingBattle>,
    pub last_result: Option<BattleResult>,
}

impl ArenaState {
    pub fn battle_in_progress(&self) -> bool {
        self.battle.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub rank: u32,
    pub honor: u64,
    /// True for fill entries that stand in for other players.
    pub synthetic: bool,
}
