//! Error types for configuration and identifier parsing.
//!
//! Scheduling operations themselves are infallible; undesirable states are
//! carried as data (not ready, not registered, delayed).

use thiserror::Error;

/// Errors produced at the edges of the scheduler.
#[derive(Debug, Error)]
pub enum SchedError {
    /// A configuration value is out of its valid domain.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// A timestamp string could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// A placement group identifier could not be parsed.
    #[error("invalid pg id: {0}")]
    InvalidPgId(String),
    /// Structured input could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
