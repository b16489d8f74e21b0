//! Native drivers
//!
//! Two ways to run the controller on one thread:
//! - `run_simulated` jumps the clock from timer to timer, as fast as possible
//! - `run_realtime` follows the wall clock and takes input from a channel
//!
//! Input producers (a stdin reader, the autopilot) never touch the game;
//! everything reaches it through the driver.

use std::io::BufRead;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use super::autopilot::Autopilot;
use crate::game::Game;
use crate::renderer::Surface;
use crate::sim::{GamePhase, InputEvent};

/// Longest the real-time loop sleeps while nothing is scheduled
const IDLE_POLL: Duration = Duration::from_millis(50);

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_ms: u64,
    pub score: u64,
    pub level: u32,
    pub lives: i32,
    pub phase: GamePhase,
}

impl RunSummary {
    fn of<S: Surface>(game: &Game<S>) -> Self {
        let state = game.state();
        Self {
            ticks: game.ticks(),
            elapsed_ms: game.now_ms(),
            score: state.score,
            level: state.level,
            lives: state.lives,
            phase: state.phase,
        }
    }
}

/// Decides when to print a frame, given ticks that may arrive in bursts
#[derive(Debug, Clone, Copy)]
pub struct FrameCadence {
    every: u64,
    last: u64,
}

impl FrameCadence {
    /// Print every `every` ticks; 0 never prints
    pub fn new(every: u64) -> Self {
        Self { every, last: 0 }
    }

    /// Whether a frame is owed at `ticks`; records it if so
    pub fn due(&mut self, ticks: u64) -> bool {
        if self.every == 0 || ticks.saturating_sub(self.last) < self.every {
            return false;
        }
        self.last = ticks;
        true
    }
}

/// Inputs spelled by one line of keyboard text.
///
/// `a`/`h` move left, `d`/`l` move right, space launches, `r` restarts.
/// Whole words work too, and an empty line launches.
pub fn parse_command(line: &str) -> Vec<InputEvent> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    match trimmed.trim().to_ascii_lowercase().as_str() {
        "" if trimmed.is_empty() => return vec![InputEvent::Launch],
        "left" => return vec![InputEvent::MoveLeft],
        "right" => return vec![InputEvent::MoveRight],
        "launch" | "space" => return vec![InputEvent::Launch],
        "restart" => return vec![InputEvent::Restart],
        _ => {}
    }
    trimmed
        .chars()
        .filter_map(|c| match c.to_ascii_lowercase() {
            'a' | 'h' => Some(InputEvent::MoveLeft),
            'd' | 'l' => Some(InputEvent::MoveRight),
            ' ' => Some(InputEvent::Launch),
            'r' => Some(InputEvent::Restart),
            _ => None,
        })
        .collect()
}

/// Read commands from stdin on a background thread.
///
/// The thread ends at EOF, on `q`, or once the receiver is gone.
pub fn spawn_stdin_input(tx: Sender<InputEvent>) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("stdin-input".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().eq_ignore_ascii_case("q") {
                    break;
                }
                for input in parse_command(&line) {
                    if tx.send(input).is_err() {
                        return;
                    }
                }
            }
            log::info!("Input closed");
        })
}

/// Run on a simulated clock until game over or `max_ticks`.
///
/// Without an autopilot the run also stops when the game is waiting for
/// input, since nothing else can move it forward.
pub fn run_simulated<S: Surface>(
    game: &mut Game<S>,
    mut autopilot: Option<&mut Autopilot>,
    max_ticks: u64,
    mut on_step: impl FnMut(&Game<S>),
) -> RunSummary {
    while game.ticks() < max_ticks && game.phase() != GamePhase::GameOver {
        // At most one input per step so time keeps moving
        if let Some(pilot) = autopilot.as_deref_mut() {
            if let Some(input) = pilot.decide(game.state()) {
                game.handle_input(input);
            }
        }
        if game.ticks() >= max_ticks {
            break;
        }

        if !game.step() {
            if game.phase() == GamePhase::AwaitingLaunch && autopilot.is_some() {
                continue;
            }
            log::info!("Nothing scheduled in phase {:?}; stopping simulated run", game.phase());
            break;
        }
        on_step(game);
    }
    RunSummary::of(game)
}

/// Run against the wall clock, applying inputs as they arrive.
///
/// Ends when the input channel closes, or when the game is over and no
/// restart arrives within the restart delay.
pub fn run_realtime<S: Surface>(
    game: &mut Game<S>,
    inputs: &Receiver<InputEvent>,
    mut autopilot: Option<&mut Autopilot>,
    mut on_step: impl FnMut(&Game<S>),
) -> RunSummary {
    let start = Instant::now();
    let base_ms = game.now_ms();
    let clock = || base_ms + start.elapsed().as_millis() as u64;
    let mut game_over_since: Option<u64> = None;

    loop {
        let now = clock();
        let wait = game
            .scheduler()
            .next_due()
            .map(|due| Duration::from_millis(due.saturating_sub(now)))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        match inputs.recv_timeout(wait) {
            Ok(input) => {
                game.advance_to(clock());
                game.handle_input(input);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::info!("Input source disconnected");
                break;
            }
        }

        if let Some(pilot) = autopilot.as_deref_mut() {
            if let Some(input) = pilot.decide(game.state()) {
                game.handle_input(input);
            }
        }

        let before = game.ticks();
        game.advance_to(clock());
        if game.ticks() != before {
            on_step(game);
        }

        if game.phase() == GamePhase::GameOver {
            let since = *game_over_since.get_or_insert(game.now_ms());
            if game.now_ms().saturating_sub(since) >= game.state().settings.restart_delay_ms * 5 {
                break;
            }
        } else {
            game_over_since = None;
        }
    }
    RunSummary::of(game)
}
