//! Hero state and the progression state machine.

pub mod hero;
pub mod progression;

pub use hero::*;
pub use progression::level_up;
