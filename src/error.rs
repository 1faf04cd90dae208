//! Error types for the configuration layer.
//!
//! Gameplay itself has no recoverable errors; every adjustment is clamped.

use std::io;
use std::path::PathBuf;

/// Failure to load or validate [`crate::Settings`].
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
