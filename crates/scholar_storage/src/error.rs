//! Error types for world-state access.

use thiserror::Error;

/// Result type for world-state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors reported by a world-state accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Keys must be non-empty.
    #[error("invalid key: key must not be an empty string")]
    InvalidKey,

    /// The start bound of a range scan sorts after its end bound.
    #[error("invalid range: start {start:?} is after end {end:?}")]
    InvalidRange {
        /// Inclusive start bound.
        start: String,
        /// Exclusive end bound.
        end: String,
    },

    /// The host could not serve the request.
    #[error("world state unavailable: {message}")]
    Unavailable {
        /// Host-provided description.
        message: String,
    },
}

impl StateError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
