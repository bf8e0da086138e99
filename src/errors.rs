// src/errors.rs

//! Crate-wide error type and result alias.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExternalError {
    /// Missing or invalid configuration, detected before any process is
    /// spawned.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The challenge-setup executable exited with a non-zero code.
    #[error("external executable exits with non-zero code! ({exec})")]
    Execution { exec: String },

    /// The install executable exited with a non-zero code.
    #[error("external installer '{exec}' exits with non-zero code!")]
    Install { exec: String },

    /// The OS could not start the process at all.
    #[error("failed to spawn external executable '{exec}': {source}")]
    Spawn {
        exec: String,
        #[source]
        source: std::io::Error,
    },

    #[error("external executable '{exec}' did not finish within {after:?}")]
    TimedOut { exec: String, after: Duration },

    #[error("external executable '{exec}' was cancelled")]
    Cancelled { exec: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ExternalError>;
