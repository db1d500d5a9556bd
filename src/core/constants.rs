// Timing (milliseconds)
pub const COMBAT_INTERVAL_MS: u64 = 3_000;
pub const RECOVERY_DELAY_MS: u64 = 5_000;
pub const ARENA_RESOLUTION_DELAY_MS: u64 = 2_000;
pub const HOUSEKEEPING_INTERVAL_MS: u64 = 30_000;
pub const AD_BONUS_DELAY_MS: u64 = 1_000;
pub const MS_PER_SECOND: i64 = 1_000;

// XP and leveling
pub const LEVEL_EXP_MULTIPLIER: u64 = 100;
pub const LEVEL_UP_ATTACK: u32 = 3;
pub const LEVEL_UP_DEFENSE: u32 = 2;
pub const LEVEL_UP_HEALTH: u32 = 10;

// Hero creation
pub const STARTING_GOLD: u64 = 100;
pub const STARTING_ARENA_RANK: u32 = 5_000;
pub const HERO_NAME_MAX_LENGTH: usize = 20;
pub const MAX_HERO_LEVEL: u32 = 1_000;

// Damage
pub const DAMAGE_RANDOMNESS: f64 = 0.2;

// Idle combat round
pub const HERO_ATTACK_CHANCE: f64 = 0.70;
pub const HERO_DEFEND_CHANCE: f64 = 0.15;
pub const HERO_CRIT_CHANCE: f64 = 0.10;
pub const HERO_CRIT_MULTIPLIER: f64 = 1.5;
pub const EVADE_SUCCESS_CHANCE: f64 = 0.30;
pub const DEFEND_DAMAGE_FACTOR: f64 = 0.5;
pub const ENEMY_ATTACK_CHANCE: f64 = 0.75;
pub const ENEMY_CRIT_CHANCE: f64 = 0.05;
pub const ENEMY_CRIT_MULTIPLIER: f64 = 1.3;
pub const COMBAT_LOG_CAPACITY: usize = 50;

// Idle enemy rewards (flat scheme)
pub const IDLE_ENEMY_GOLD: u64 = 10;
pub const IDLE_ENEMY_EXPERIENCE: u64 = 10;
pub const IDLE_MATERIAL_DROP_CHANCE: f64 = 0.30;
pub const SCALED_MATERIAL_DROP_CHANCE: f64 = 0.25;

// Enemy stat lines: (base, per level)
pub const IDLE_ENEMY_HEALTH: (u32, u32) = (80, 15);
pub const IDLE_ENEMY_ATTACK: (u32, u32) = (8, 2);
pub const IDLE_ENEMY_DEFENSE: (u32, u32) = (5, 1);
pub const SCALED_ENEMY_HEALTH: (u32, u32) = (60, 12);
pub const SCALED_ENEMY_ATTACK: (u32, u32) = (6, 2);
pub const SCALED_ENEMY_DEFENSE: (u32, u32) = (4, 1);
pub const SCALED_ENEMY_EXPERIENCE: (u32, u32) = (15, 4);
pub const SCALED_ENEMY_GOLD: (u32, u32) = (8, 2);

// Offline progression
pub const MAX_OFFLINE_HOURS: u32 = 8;
pub const MAX_OFFLINE_SECONDS: i64 = MAX_OFFLINE_HOURS as i64 * 3_600;
pub const MIN_OFFLINE_SECONDS: i64 = 300;
pub const OFFLINE_GOLD_PER_HOUR: (u64, u64) = (30, 8);
pub const OFFLINE_EXP_PER_HOUR: (u64, u64) = (60, 15);
pub const OFFLINE_FULL_EFFICIENCY_HOURS: f64 = 2.0;
pub const OFFLINE_EFFICIENCY_DECAY_PER_HOUR: f64 = 0.1;
pub const OFFLINE_EFFICIENCY_FLOOR: f64 = 0.3;
// hours x efficiency tops out here; longer absences pay the same
pub const OFFLINE_PEAK_HOURS: f64 = 6.0;
pub const OFFLINE_MATERIAL_CHANCE_CAP: f64 = 0.8;
pub const OFFLINE_MATERIAL_CHANCE_PER_HOUR: f64 = 0.1;
pub const AD_BONUS_MULTIPLIER: f64 = 2.0;

// Arena
pub const ARENA_RANK_VARIANCE: f64 = 0.1;
pub const ARENA_MIN_RANK_VARIANCE: u32 = 100;
pub const ARENA_LEVEL_VARIANCE: i64 = 2;
pub const ARENA_STAT_GROWTH_PER_LEVEL: f64 = 0.1;
pub const ARENA_RANK_BONUS_CEILING: f64 = 5_000.0;
pub const ARENA_RANK_BONUS_MAX: f64 = 0.5;
pub const ARENA_JITTER_MIN: f64 = 0.8;
pub const ARENA_JITTER_MAX: f64 = 1.2;
pub const ARENA_WIN_HONOR_BASE: i64 = 15;
pub const ARENA_WIN_HONOR_MIN: i64 = 5;
pub const ARENA_LOSS_HONOR_BASE: i64 = -5;
pub const ARENA_LOSS_HONOR_MIN: i64 = -10;
pub const ARENA_MAX_RANK_REGRESSION: i64 = 10;
pub const WIN_PROBABILITY_FLOOR: f64 = 0.1;
pub const WIN_PROBABILITY_CEILING: f64 = 0.9;
pub const LEADERBOARD_FILL_SIZE: u32 = 20;

// Crafting
pub const SKIP_GOLD_PER_SECOND: u64 = 10;
