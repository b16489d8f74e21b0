//! Break Those Bricks entry point
//!
//! Runs the game headless in a terminal: either on a simulated clock (as
//! fast as possible, usually with the autopilot) or in real time with
//! keyboard commands read from stdin.

use std::path::PathBuf;

use clap::Parser;

use break_bricks::Game;
use break_bricks::platform::{self, Autopilot, FrameCadence, RunSummary};
use break_bricks::renderer::AsciiSurface;
use break_bricks::settings::Settings;

#[derive(Parser)]
#[command(version, about = "Break those Bricks! A terminal brick breaker.")]
struct Cli {
    /// JSON settings file; defaults are used for anything missing
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the autopilot's aim jitter
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Follow the wall clock and read commands from stdin
    /// (a/d move, empty line launches, r restarts, q quits)
    #[arg(long)]
    realtime: bool,

    /// Let the computer play
    #[arg(long)]
    autopilot: bool,

    /// Stop a simulated run after this many ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Print the arena every N ticks (0 prints only the final frame)
    #[arg(long, default_value_t = 0)]
    frames: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Break those Bricks! starting...");

    let settings = Settings::load_or_default(cli.config.as_deref());
    let surface = AsciiSurface::new(settings.arena_width, settings.arena_height);
    let mut game = Game::new(&settings, surface);
    let mut autopilot = cli.autopilot.then(|| Autopilot::new(cli.seed));

    let mut cadence = FrameCadence::new(cli.frames);
    let print_frame = |game: &Game<AsciiSurface>| {
        if cadence.due(game.ticks()) {
            println!("{}", game.surface().render());
        }
    };

    let summary = if cli.realtime {
        let (tx, rx) = crossbeam_channel::unbounded();
        if let Err(e) = platform::spawn_stdin_input(tx) {
            log::error!("Failed to start input thread: {e}");
            std::process::exit(1);
        }
        println!("{}", game.surface().render());
        platform::run_realtime(&mut game, &rx, autopilot.as_mut(), print_frame)
    } else {
        if autopilot.is_none() {
            log::warn!("Simulated run without --autopilot stops at the first launch prompt");
        }
        platform::run_simulated(&mut game, autopilot.as_mut(), cli.max_ticks, print_frame)
    };

    println!("{}", game.surface().render());
    report(&summary);
}

fn report(summary: &RunSummary) {
    println!(
        "{:?} after {} ticks ({} ms): score {}, level {}, lives {}",
        summary.phase,
        summary.ticks,
        summary.elapsed_ms,
        summary.score,
        summary.level,
        summary.lives
    );
}
