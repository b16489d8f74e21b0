//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Unit-step directions only, no randomness
//! - Stable iteration order (by body ID)
//! - Time advances only through the scheduler
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use body::{Body, BodyId, BodyKind, Bounds, Shape};
pub use collision::{Contact, query_overlaps, reflect_direction};
pub use scheduler::{Scheduler, TimerAction};
pub use state::{Arena, Ball, Brick, BrickHit, GameEvent, GamePhase, GameState, Paddle, PaddleMove};
pub use tick::{InputEvent, InputOutcome, TickOutcome, apply_input, generate_bricks, launch, restart_round, setup_round, tick};
