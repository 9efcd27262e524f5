//! Error types for the session loop

use thiserror::Error;

use crate::core::BoardError;

/// Rejected configuration. Raised before the loop starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Board dimensions out of range
    #[error(transparent)]
    Board(#[from] BoardError),

    /// Frame-rate cap of zero
    #[error("frame rate must be positive")]
    FrameRate,

    /// Duration that is negative, NaN or too large
    #[error("invalid session duration: {0}")]
    Duration(String),

    /// A repeat or gravity interval of zero
    #[error("{name} interval must be non-zero")]
    ZeroInterval { name: &'static str },
}

/// Anything that ends a session other than the deadline
#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The participant (or the window system) asked to quit. Hosts unwind entirely.
    #[error("session aborted by quit request")]
    Aborted,

    /// Input, render or audio backend failure. Not recoverable.
    #[error("backend failure: {0:#}")]
    Backend(anyhow::Error),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
