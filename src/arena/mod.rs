//! Arena: opponent matchmaking, battle resolution and the ladder.

pub mod leaderboard;
pub mod logic;
pub mod types;

pub use leaderboard::{build_leaderboard, ArenaBoard};
pub use logic::{find_opponent, resolve_battle};
pub use types::*;
