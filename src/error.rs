//! Error types for rudoro.

use thiserror::Error;

use crate::features::focus::Phase;

/// Errors that can occur while running rudoro.
#[derive(Error, Debug)]
pub enum RudoroError {
    /// Configuration could not be loaded, saved or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup or key polling failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A notification sound could not be played.
    #[error("Sound error: {0}")]
    Sound(String),

    /// User input was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A phase was started while another one was still counting down.
    #[error("A {0} phase is already running")]
    PhaseAlreadyRunning(Phase),

    /// An operation needed a running phase but none was running.
    #[error("No phase is running")]
    NoActivePhase,

    /// A phase could not be started with the given kind or duration.
    #[error("Invalid phase: {0}")]
    InvalidPhase(String),

    /// A value could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RudoroError {
    /// Whether the interactive loop can report this error and carry on.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Sound(_) | Self::InvalidInput(_) | Self::Parse(_)
        )
    }
}
