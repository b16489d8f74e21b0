//! Timer-driven game controller
//!
//! Owns the simulation state, the timer queue and the surface. It is the
//! only thing that mutates the game: inputs are applied the moment they
//! arrive, and ticks run when their timer comes due, one at a time.

use crate::renderer::{Presenter, Surface};
use crate::settings::Settings;
use crate::sim::{
    GamePhase, GameState, InputEvent, InputOutcome, Scheduler, TickOutcome, TimerAction,
    apply_input, restart_round, tick,
};

/// Game instance holding all state
pub struct Game<S: Surface> {
    state: GameState,
    scheduler: Scheduler,
    surface: S,
    presenter: Presenter,
    ticks: u64,
}

impl<S: Surface> Game<S> {
    /// New game drawn onto `surface`, waiting for launch
    pub fn new(settings: &Settings, surface: S) -> Self {
        if surface.width() != settings.arena_width || surface.height() != settings.arena_height {
            log::warn!(
                "Surface is {}x{} but the arena is {}x{}",
                surface.width(),
                surface.height(),
                settings.arena_width,
                settings.arena_height
            );
        }
        let mut game = Self {
            state: GameState::new(settings),
            scheduler: Scheduler::new(),
            surface,
            presenter: Presenter::new(),
            ticks: 0,
        };
        game.flush_events();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access, for scripted setups
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Ticks run since the game was created
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current controller clock
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Apply one input right now
    pub fn handle_input(&mut self, input: InputEvent) -> InputOutcome {
        let outcome = apply_input(&mut self.state, input);
        match outcome {
            InputOutcome::Launched => {
                self.flush_events();
                self.run_tick();
            }
            InputOutcome::Restarted => {
                self.scheduler.clear();
                self.flush_events();
            }
            InputOutcome::Moved | InputOutcome::Ignored => self.flush_events(),
        }
        outcome
    }

    /// Run every timer due at or before `now_ms`, in order
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(action) = self.scheduler.pop_due(now_ms) {
            self.fire(action);
        }
        self.scheduler.set_now(now_ms);
    }

    pub fn advance_by(&mut self, delta_ms: u64) {
        self.advance_to(self.scheduler.now_ms() + delta_ms);
    }

    /// Jump the clock to the next pending timer and run it.
    ///
    /// Returns false when nothing is pending.
    pub fn step(&mut self) -> bool {
        match self.scheduler.next_due() {
            Some(due) => {
                self.advance_to(due);
                true
            }
            None => false,
        }
    }

    fn fire(&mut self, action: TimerAction) {
        match action {
            TimerAction::Tick => {
                self.run_tick();
            }
            TimerAction::RestartRound => {
                restart_round(&mut self.state);
                self.flush_events();
            }
        }
    }

    fn run_tick(&mut self) -> TickOutcome {
        let outcome = tick(&mut self.state);
        if outcome != TickOutcome::Idle {
            self.ticks += 1;
        }

        match outcome {
            TickOutcome::Continue => {
                debug_assert_eq!(self.scheduler.pending(TimerAction::Tick), 0, "tick re-entered");
                self.scheduler
                    .schedule(self.state.settings.tick_interval_ms, TimerAction::Tick);
            }
            TickOutcome::BallLost => {
                self.scheduler
                    .schedule(self.state.settings.restart_delay_ms, TimerAction::RestartRound);
            }
            TickOutcome::LevelCleared | TickOutcome::GameOver | TickOutcome::Idle => {}
        }

        self.flush_events();
        outcome
    }

    fn flush_events(&mut self) {
        let events = self.state.drain_events();
        self.presenter.apply_all(&mut self.surface, &events);
    }
}
