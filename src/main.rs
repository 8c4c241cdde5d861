//! Main entry point for the simulator.
//!
//! Parses command line options, initializes logging and hands the terminal
//! over to the interactive menu.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use sweep_grid::config::SimConfig;
use sweep_grid::config::sim::TICK_DELAY_MS;
use sweep_grid::shell::Shell;
use sweep_grid::sim::schedule::RealTimeScheduler;

#[derive(Parser)]
#[command(
    name = "sweep-grid",
    version,
    about = "Watch a cleaning robot sweep a grid around moving obstacles"
)]
struct Cli {
    /// Pause after every cleaned cell, in milliseconds.
    #[arg(long, default_value_t = TICK_DELAY_MS)]
    tick_delay_ms: u64,

    /// Seed for obstacle mobility and movement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON summary of every sweep to this file.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Do not clear the terminal between frames.
    #[arg(long)]
    no_clear: bool,
}

fn main() -> io::Result<()> {
    // Logs go to stderr; keep them quiet unless RUST_LOG asks for more.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = SimConfig {
        tick_delay: Duration::from_millis(cli.tick_delay_ms),
        seed: cli.seed,
        report_path: cli.report,
        clear_screen: !cli.no_clear,
        ..SimConfig::default()
    };

    let random = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), config, RealTimeScheduler::new(), random);
    shell.run()
}
