//! Error types for outcomes, futures and configuration.

use crate::outcome::Exception;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by the future contract itself.
///
/// Producer failures never appear here directly; they travel inside
/// [`Outcome::Failure`](crate::outcome::Outcome) and are only surfaced through
/// [`FutureError::ExecutionFailed`] when a caller asks for the wrapped policy.
#[derive(Debug, Error)]
pub enum FutureError {
    /// A second cancellation listener was registered on the same future.
    #[error("Only one cancellation listener is supported")]
    CancelListenerAlreadyRegistered,

    /// The producing computation failed; the original failure is the source.
    #[error("Execution failed: {source}")]
    ExecutionFailed {
        #[source]
        source: Exception,
    },

    /// The future was cancelled before a result was delivered.
    #[error("Future was cancelled")]
    Cancelled,

    /// A bounded wait elapsed before the future resolved.
    #[error("Timed out after {0:?} waiting for result")]
    TimedOut(Duration),

    /// A task callable panicked while running.
    #[error("Task panicked: {0}")]
    Panicked(String),

    /// An executor refused a job (for example after shutdown).
    #[error("Executor rejected job: {0}")]
    Rejected(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
