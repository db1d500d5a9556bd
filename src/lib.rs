//! Idle Arena - idle combat and progression engine
//!
//! Heroes fight generated enemies on a fixed cadence, craft and enhance gear,
//! climb an arena ladder and collect rewards for time spent away. All of it
//! runs on one simulated clock owned by [`Game`].

pub mod arena;
pub mod character;
pub mod combat;
pub mod core;
pub mod enhancement;
pub mod game;
pub mod items;
pub mod shop;
pub mod simulator;
pub mod workshop;

pub use crate::core::config::GameConfig;
pub use crate::core::error::{GameError, GameResult};
pub use game::{Game, GameEvent};
