//! Equipment enhancement: gold in, fixed stat growth out, capped at +10.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
