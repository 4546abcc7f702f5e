//! Error types for respawn
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in respawn
#[derive(Debug, Error)]
pub enum RespawnError {
    /// Bad or missing command-line arguments; carries the full guidance text
    #[error("{0}")]
    Usage(String),

    /// A replacement process could not be created
    #[error("Spawn error: {0}")]
    Spawn(String),

    /// Signal handler registration failed
    #[error("Signal error: {0}")]
    Signal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RespawnError {
    /// Whether this error should abort before any cycle runs
    pub fn is_usage(&self) -> bool {
        matches!(self, RespawnError::Usage(_))
    }

    /// Process exit status for an error that escapes to `main`
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type alias for respawn operations
pub type Result<T> = std::result::Result<T, RespawnError>;
