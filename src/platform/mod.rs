//! Platform layer
//!
//! Everything that talks to the outside world on behalf of the controller:
//! - Time (simulated or wall clock)
//! - Input events (stdin, autopilot)

pub mod autopilot;
pub mod native;

pub use autopilot::Autopilot;
pub use native::{FrameCadence, RunSummary, parse_command, run_realtime, run_simulated, spawn_stdin_input};
