//! Game balance simulator CLI.
//!
//! Plays heroes through simulated hours on the real engine.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # 20 runs of 8 hours
//!   cargo run --bin simulate -- -n 5 -H 24        # 5 runs of a full day
//!   cargo run --bin simulate -- --seed 42         # Reproducible run
//!   RUST_LOG=debug cargo run --bin simulate       # Per-run engine logs

use idle_arena::character::HeroClass;
use idle_arena::simulator::{run_simulation, SimConfig};
use idle_arena::GameConfig;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (config, show_level_curve) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              IDLE ARENA BALANCE SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Hours per run:  {}", config.hours);
    println!("  Class:          {}", config.class);
    println!("  Crafting:       {}", config.simulate_crafting);
    if config.arena_every_minutes > 0 {
        println!("  Arena:          every {} min", config.arena_every_minutes);
    } else {
        println!("  Arena:          off");
    }
    println!("  Idle rewards:   {:?}", config.game.idle_rewards);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if show_level_curve {
        println!("{}", report.level_curve_text());
    }

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn next_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_args(args: &[String]) -> Result<(SimConfig, bool), String> {
    let mut config = SimConfig::default();
    let mut show_level_curve = false;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--runs" => {
                config.num_runs = next_value(args, i, flag)?.parse().unwrap_or(20);
                i += 1;
            }
            "-H" | "--hours" => {
                config.hours = next_value(args, i, flag)?.parse().unwrap_or(8);
                i += 1;
            }
            "-s" | "--seed" => {
                config.seed = next_value(args, i, flag)?.parse().ok();
                i += 1;
            }
            "-c" | "--class" => {
                config.class = next_value(args, i, flag)?
                    .parse::<HeroClass>()
                    .map_err(|e| e.to_string())?;
                i += 1;
            }
            "-a" | "--arena" => {
                config.arena_every_minutes = next_value(args, i, flag)?.parse().unwrap_or(10);
                i += 1;
            }
            "--config" => {
                let path = next_value(args, i, flag)?;
                config.game = GameConfig::load(Path::new(path)).map_err(|e| e.to_string())?;
                i += 1;
            }
            "--no-craft" => {
                config.simulate_crafting = false;
            }
            "--idle-only" => {
                config = SimConfig {
                    seed: config.seed,
                    ..SimConfig::idle_only(config.hours)
                };
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "--level-curve" => {
                show_level_curve = true;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    Ok((config, show_level_curve))
}

fn print_help() {
    println!("Idle Arena Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 20)");
    println!("    -H, --hours <H>     Simulated hours per run (default: 8)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -c, --class <C>     Warrior, Guardian or Mage (default: Warrior)");
    println!("    -a, --arena <M>     Minutes between arena battles, 0 = off (default: 10)");
    println!("    --config <FILE>     Load engine settings from a TOML file");
    println!("    --no-craft          Disable crafting and enhancement");
    println!("    --idle-only         Idle combat only");
    println!("    --level-curve       Show detailed level-up pacing");
    println!("    --json              Save JSON report");
    println!("    --quick             One 1-hour run");
    println!("    -h, --help          Show this help");
    println!();
    println!("ENVIRONMENT:");
    println!("    RUST_LOG=info|debug Engine log output (stderr)");
}
