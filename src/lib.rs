//! Break Those Bricks - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, game state)
//! - `game`: Timer-driven controller tying the simulation to a surface
//! - `renderer`: Render surface boundary plus recording/ASCII surfaces
//! - `platform`: Native driver, input source and autopilot
//! - `settings`: Data-driven game configuration

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 610.0;
    pub const ARENA_HEIGHT: f32 = 400.0;
    /// Largest width or height a settings file may ask for
    pub const MAX_ARENA_DIM: f32 = 4096.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_SPEED: f32 = 5.0;
    /// Ball spawns with its center at this height, just above the paddle
    pub const BALL_SPAWN_Y: f32 = 310.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_Y: f32 = 326.0;
    pub const PADDLE_STEP: f32 = 15.0;

    /// Brick grid layout
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_GRID_MARGIN: f32 = 5.0;
    /// Row centers, top to bottom, paired with their starting hit counts
    pub const BRICK_ROWS: [(f32, u8); 3] = [(50.0, 3), (70.0, 2), (90.0, 1)];

    /// Scoring
    pub const POINTS_PER_BRICK_HIT: u64 = 10;
    pub const INITIAL_LIVES: i32 = 3;

    /// Timer delays (milliseconds)
    pub const TICK_INTERVAL_MS: u64 = 20;
    pub const RESTART_DELAY_MS: u64 = 1000;
}
