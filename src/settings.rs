//! Game settings
//!
//! Tunable rules and timings, loaded from an optional JSON file. Anything
//! missing from the file falls back to the classic values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SettingsError};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Timing ===
    /// Delay between Running ticks
    pub tick_interval_ms: u64,
    /// Delay before a new round after a lost ball
    pub restart_delay_ms: u64,

    // === Rules ===
    /// Horizontal distance per paddle move input
    pub paddle_step: f32,
    pub initial_lives: i32,
    pub ball_start_speed: f32,
    /// Added to the ball speed on every level clear
    pub speed_increment: f32,
    pub points_per_brick: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            tick_interval_ms: TICK_INTERVAL_MS,
            restart_delay_ms: RESTART_DELAY_MS,

            paddle_step: PADDLE_STEP,
            initial_lives: INITIAL_LIVES,
            ball_start_speed: BALL_START_SPEED,
            speed_increment: 1.0,
            points_per_brick: POINTS_PER_BRICK_HIT,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Reject values that cannot make a playable game
    pub fn validate(&self) -> Result<()> {
        if self.arena_width < PADDLE_WIDTH || self.arena_width < BRICK_WIDTH + 2.0 * BRICK_GRID_MARGIN
        {
            return Err(SettingsError::Invalid(format!(
                "arena_width {} is too narrow for the paddle and one brick column",
                self.arena_width
            )));
        }
        if self.arena_height <= PADDLE_Y + PADDLE_HEIGHT {
            return Err(SettingsError::Invalid(format!(
                "arena_height {} leaves no room below the paddle",
                self.arena_height
            )));
        }
        if self.arena_width > MAX_ARENA_DIM || self.arena_height > MAX_ARENA_DIM {
            return Err(SettingsError::Invalid(format!(
                "arena {}x{} exceeds the {MAX_ARENA_DIM} limit",
                self.arena_width, self.arena_height
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.ball_start_speed <= 0.0 || self.paddle_step <= 0.0 {
            return Err(SettingsError::Invalid(
                "ball_start_speed and paddle_step must be positive".into(),
            ));
        }
        if self.speed_increment < 0.0 || self.initial_lives < 0 {
            return Err(SettingsError::Invalid(
                "speed_increment and initial_lives cannot be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.arena_width, 610.0);
        assert_eq!(settings.restart_delay_ms, 1000);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "initial_lives": 5, "tick_interval_ms": 10 }"#)
            .expect("valid settings");
        assert_eq!(settings.initial_lives, 5);
        assert_eq!(settings.tick_interval_ms, 10);
        assert_eq!(settings.paddle_step, PADDLE_STEP);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "arena_width": 50 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "tick_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_oversized_arena_rejected() {
        let err = Settings::from_json(r#"{ "arena_width": 1e12 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "arena_height": 5000 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let max = format!(r#"{{ "arena_width": {MAX_ARENA_DIM}, "arena_height": {MAX_ARENA_DIM} }}"#);
        assert!(Settings::from_json(&max).is_ok());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/break-bricks/settings.json");
        assert!(matches!(Settings::load_from(path), Err(SettingsError::Io { .. })));
        assert_eq!(Settings::load_or_default(Some(path)), Settings::default());
    }
}
