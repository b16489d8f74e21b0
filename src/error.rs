//! Error types for loading configuration

use std::path::PathBuf;

use thiserror::Error;

/// Settings loading errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for `Settings`
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parsed, but the values cannot make a playable game
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;
