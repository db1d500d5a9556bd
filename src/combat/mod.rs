//! Idle combat: enemy generation, round resolution and the per-hero session.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
