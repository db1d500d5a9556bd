//! Simulation report generation.

use super::runner::RunStats;
use crate::arena::rank_title;
use crate::core::format::{format_duration, format_number};
use serde::Serialize;

/// Aggregated results from a batch of runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub hours: u32,

    // Progression
    pub avg_final_level: f64,
    pub max_final_level: u32,
    pub avg_enemies_defeated: f64,
    pub avg_defeats: f64,
    pub avg_final_power: f64,

    // Economy
    pub avg_final_gold: f64,
    pub avg_items_crafted: f64,
    pub avg_enhancements: f64,

    // Arena
    pub avg_final_rank: f64,
    pub avg_final_honor: f64,
    pub arena_win_rate: f64,

    /// Average minute each level was first reached, starting at level 2.
    /// Only runs that reached the level count towards its average.
    pub avg_minute_per_level: Vec<f64>,

    #[serde(skip)]
    pub runs: Vec<RunStats>,
}

fn average(runs: &[RunStats], value: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(value).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>, hours: u32) -> Self {
        let battles: u32 = runs.iter().map(|r| r.arena_battles()).sum();
        let wins: u32 = runs.iter().map(|r| r.arena_wins).sum();
        let arena_win_rate = if battles == 0 {
            0.0
        } else {
            wins as f64 / battles as f64
        };

        let deepest = runs
            .iter()
            .map(|r| r.level_up_minutes.len())
            .max()
            .unwrap_or(0);
        let avg_minute_per_level = (0..deepest)
            .map(|idx| {
                let reached: Vec<u64> = runs
                    .iter()
                    .filter_map(|r| r.level_up_minutes.get(idx).copied())
                    .collect();
                reached.iter().sum::<u64>() as f64 / reached.len() as f64
            })
            .collect();

        Self {
            num_runs: runs.len() as u32,
            hours,
            avg_final_level: average(&runs, |r| r.final_level as f64),
            max_final_level: runs.iter().map(|r| r.final_level).max().unwrap_or(0),
            avg_enemies_defeated: average(&runs, |r| r.enemies_defeated as f64),
            avg_defeats: average(&runs, |r| r.defeats as f64),
            avg_final_power: average(&runs, |r| r.final_power),
            avg_final_gold: average(&runs, |r| r.final_gold as f64),
            avg_items_crafted: average(&runs, |r| r.items_crafted as f64),
            avg_enhancements: average(&runs, |r| r.enhancements as f64),
            avg_final_rank: average(&runs, |r| r.final_rank as f64),
            avg_final_honor: average(&runs, |r| r.final_honor as f64),
            arena_win_rate,
            avg_minute_per_level,
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {}, {} of play each\n\n",
            self.num_runs,
            format_duration(self.hours as i64 * 3_600)
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Level:     {:.1} (best {})\n",
            self.avg_final_level, self.max_final_level
        ));
        report.push_str(&format!(
            "  Avg Enemies Slain:   {:.0}\n",
            self.avg_enemies_defeated
        ));
        report.push_str(&format!("  Avg Defeats:         {:.1}\n", self.avg_defeats));
        report.push_str(&format!(
            "  Avg Power Rating:    {:.1}\n\n",
            self.avg_final_power
        ));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Gold:      {}\n",
            format_number(self.avg_final_gold as u64)
        ));
        report.push_str(&format!(
            "  Avg Items Crafted:   {:.1}\n",
            self.avg_items_crafted
        ));
        report.push_str(&format!(
            "  Avg Enhancements:    {:.1}\n\n",
            self.avg_enhancements
        ));

        report.push_str("── ARENA ────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Rank:      {:.0} ({})\n",
            self.avg_final_rank,
            rank_title(self.avg_final_rank as u32)
        ));
        report.push_str(&format!(
            "  Avg Final Honor:     {:.0}\n",
            self.avg_final_honor
        ));
        report.push_str(&format!(
            "  Win Rate:            {:.1}%\n",
            self.arena_win_rate * 100.0
        ));
        if self.avg_defeats > self.avg_enemies_defeated {
            report.push_str("  ⚠️  More defeats than kills - enemy damage too high?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Level-up pacing, one line per level.
    pub fn level_curve_text(&self) -> String {
        let mut text = String::from("── LEVEL CURVE ──────────────────────────────────────────────────\n");
        let mut previous = 0.0;
        for (idx, minute) in self.avg_minute_per_level.iter().enumerate() {
            text.push_str(&format!(
                "  Level {:3}: {:>8} (+{})\n",
                idx + 2,
                format_duration((minute * 60.0) as i64),
                format_duration(((minute - previous) * 60.0) as i64)
            ));
            previous = *minute;
        }
        text
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
