//! Headless balance simulator.
//!
//! Plays heroes through simulated hours on the real engine to measure:
//! - Level pacing under idle combat
//! - Death rate against generated enemies
//! - Crafting and enhancement throughput
//! - Arena rank drift

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run, RunStats};
