//! Engine façade: heroes, sessions and every scheduled continuation behind
//! one `&mut Game`.
//!
//! Time only moves when the host calls [`Game::advance`] or
//! [`Game::advance_to`]. Each due task runs to completion before the next
//! one starts, so no two mutations of a hero ever overlap.

pub mod arena;
pub mod events;
pub mod idle;
pub mod offline;
pub mod registry;
pub mod save;
pub mod workshop;

pub use events::GameEvent;
pub use registry::HeroRegistry;

use crate::arena::{ArenaBoard, ArenaState};
use crate::character::{validate_hero, Hero, HeroClass, HeroPatch};
use crate::combat::IdleSession;
use crate::core::config::GameConfig;
use crate::core::error::{GameError, GameResult};
use crate::core::offline::OfflineRewards;
use crate::core::rng::RandomSource;
use crate::core::scheduler::{Scheduler, TaskHandle};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// `now + delta`, pinned at `i64::MAX` instead of wrapping.
fn advance_target(now_ms: i64, delta_ms: u64) -> i64 {
    now_ms.saturating_add(i64::try_from(delta_ms).unwrap_or(i64::MAX))
}

/// Work the scheduler can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// One idle round, valid only while the session is still on `epoch`.
    IdleTick { hero_id: String, epoch: u64 },
    Recovery { hero_id: String },
    ArenaResolve { hero_id: String },
    AdBonusClaim { hero_id: String },
    /// Leaderboard rebuild and activity refresh, repeating.
    Housekeeping,
}

pub struct Game {
    config: GameConfig,
    registry: HeroRegistry,
    sessions: BTreeMap<String, IdleSession>,
    /// Outstanding idle tick per hero; at most one.
    idle_ticks: BTreeMap<String, TaskHandle>,
    arena: BTreeMap<String, ArenaState>,
    board: ArenaBoard,
    ad_claims: BTreeMap<String, OfflineRewards>,
    scheduler: Scheduler<Task>,
    rng: Box<dyn RandomSource + Send>,
}

impl Game {
    /// Engine starting at the current wall clock with an entropy-seeded RNG.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(
            config,
            chrono::Utc::now().timestamp_millis(),
            StdRng::from_entropy(),
        )
    }

    /// Engine with a fixed start time and random source, for simulation and
    /// tests.
    pub fn with_rng(
        config: GameConfig,
        start_ms: i64,
        rng: impl RandomSource + Send + 'static,
    ) -> Self {
        let mut scheduler = Scheduler::new(start_ms);
        scheduler.schedule_in(config.housekeeping_interval_ms, Task::Housekeeping);
        Self {
            config,
            registry: HeroRegistry::new(),
            sessions: BTreeMap::new(),
            idle_ticks: BTreeMap::new(),
            arena: BTreeMap::new(),
            board: ArenaBoard::default(),
            ad_claims: BTreeMap::new(),
            scheduler,
            rng: Box::new(rng),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current simulated time in unix milliseconds.
    pub fn now(&self) -> i64 {
        self.scheduler.now()
    }

    /// Number of scheduled tasks, housekeeping included.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn next_due(&self) -> Option<i64> {
        self.scheduler.next_due()
    }

    // =========================================================================
    // TIME
    // =========================================================================

    /// Move time forward by `delta_ms`, running everything that comes due.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<GameEvent> {
        self.advance_to(advance_target(self.now(), delta_ms))
    }

    /// Run every task due at or before `target_ms`, in due order, then park
    /// the clock at `target_ms`. A target in the past runs nothing.
    pub fn advance_to(&mut self, target_ms: i64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(task) = self.scheduler.pop_due(target_ms) {
            self.run_task(task, &mut events);
        }
        self.scheduler.set_now(target_ms);
        events
    }

    fn run_task(&mut self, task: Task, events: &mut Vec<GameEvent>) {
        debug!("running {:?} at {}", task, self.now());
        match task {
            Task::IdleTick { hero_id, epoch } => self.run_idle_tick(&hero_id, epoch, events),
            Task::Recovery { hero_id } => self.run_recovery(&hero_id, events),
            Task::ArenaResolve { hero_id } => self.run_arena_resolve(&hero_id, events),
            Task::AdBonusClaim { hero_id } => self.run_ad_bonus_claim(&hero_id, events),
            Task::Housekeeping => self.run_housekeeping(events),
        }
    }

    fn run_housekeeping(&mut self, events: &mut Vec<GameEvent>) {
        let now = self.now();
        for (hero_id, session) in &self.sessions {
            if session.active {
                if let Ok(hero) = self.registry.require_mut(hero_id) {
                    hero.last_active = now;
                }
            }
        }
        self.board.rebuild(self.registry.iter(), now, &mut *self.rng);
        events.push(GameEvent::LeaderboardRebuilt {
            entries: self.board.entries().len(),
        });
        self.scheduler
            .schedule_in(self.config.housekeeping_interval_ms, Task::Housekeeping);
    }

    // =========================================================================
    // HEROES
    // =========================================================================

    /// Create a level 1 hero with the configured starting gold and rank.
    pub fn create_hero(&mut self, name: &str, class: HeroClass) -> GameResult<Hero> {
        let mut hero = Hero::new(name, class, self.now())?;
        hero.gold = self.config.starting_gold;
        hero.arena_rank = self.config.starting_arena_rank;
        info!("created {} {} ({})", hero.class, hero.name, hero.id);
        self.registry.insert(hero.clone());
        Ok(hero)
    }

    pub fn hero(&self, hero_id: &str) -> Option<&Hero> {
        self.registry.get(hero_id)
    }

    pub fn heroes(&self) -> impl Iterator<Item = &Hero> {
        self.registry.iter()
    }

    /// Apply a patch after checking the result against `validate_hero`.
    pub fn update_hero(&mut self, hero_id: &str, patch: &HeroPatch) -> GameResult<Hero> {
        let current = self.registry.require(hero_id)?;
        let next = patch.applied_to(current)?;
        if !validate_hero(&next) {
            return Err(GameError::InvalidArgument(
                "patched hero fails validation".to_string(),
            ));
        }
        debug!("updated hero {}", hero_id);
        self.registry.insert(next.clone());
        Ok(next)
    }
}
