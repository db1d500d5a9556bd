//! Derived arena ladder: real heroes plus synthetic fill for the top ranks.

use super::types::{LeaderboardEntry, LEADERBOARD_NAMES};
use crate::character::Hero;
use crate::core::constants::{LEADERBOARD_FILL_SIZE, STARTING_ARENA_RANK};
use crate::core::rng::RandomSource;
use serde::{Deserialize, Serialize};

/// Build a ladder from the given heroes.
///
/// Ranks 1..=20 not held by a real hero get a synthetic entry whose level
/// and honor are drawn around the best-ranked real hero. Each fill entry
/// draws name, level and honor in that order. Sorted by rank, real heroes
/// before fill at equal rank.
pub fn build_leaderboard<'a>(
    heroes: impl IntoIterator<Item = &'a Hero>,
    rng: &mut dyn RandomSource,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = heroes
        .into_iter()
        .map(|hero| LeaderboardEntry {
            id: hero.id.clone(),
            name: hero.name.clone(),
            level: hero.level,
            rank: hero.arena_rank,
            honor: hero.honor_points,
            synthetic: false,
        })
        .collect();

    let (ref_level, ref_rank, ref_honor) = entries
        .iter()
        .min_by_key(|entry| entry.rank)
        .map(|entry| (entry.level, entry.rank, entry.honor))
        .unwrap_or((1, STARTING_ARENA_RANK, 0));

    for rank in 1..=LEADERBOARD_FILL_SIZE {
        if entries.iter().any(|entry| !entry.synthetic && entry.rank == rank) {
            continue;
        }
        let name = LEADERBOARD_NAMES[rng.pick_index(LEADERBOARD_NAMES.len())];
        let level_offset = ((rng.next_f64() - 0.5) * 10.0).floor() as i64;
        let level = (ref_level as i64 + level_offset).max(1) as u32;
        let honor = ref_honor as i64
            + (ref_rank as i64 - rank as i64) * 10
            + (rng.next_f64() * 100.0).floor() as i64;
        entries.push(LeaderboardEntry {
            id: format!("fill_{}", rank),
            name: name.to_string(),
            level,
            rank,
            honor: honor.max(0) as u64,
            synthetic: true,
        });
    }

    entries.sort_by_key(|entry| (entry.rank, entry.synthetic));
    entries
}

/// Cached ladder, rebuilt by housekeeping or on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaBoard {
    entries: Vec<LeaderboardEntry>,
    rebuilt_at: Option<i64>,
}

impl ArenaBoard {
    pub fn rebuild<'a>(
        &mut self,
        heroes: impl IntoIterator<Item = &'a Hero>,
        now_ms: i64,
        rng: &mut dyn RandomSource,
    ) {
        self.entries = build_leaderboard(heroes, rng);
        self.rebuilt_at = Some(now_ms);
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuilt_at(&self) -> Option<i64> {
        self.rebuilt_at
    }
}
