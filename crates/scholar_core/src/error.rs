//! Error types for the record engine.

use scholar_codec::CodecError;
use scholar_storage::StateError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in record operations.
///
/// Every error aborts the invocation it occurs in. Callers running inside
/// [`invoke`](scholar_storage::invoke) get their staged writes discarded.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The record is absent.
    #[error("the {collection} {id} does not exist")]
    NotFound {
        /// Collection name.
        collection: &'static str,
        /// Requested record ID.
        id: String,
    },

    /// The record is already present.
    #[error("the {collection} {id} already exists")]
    AlreadyExists {
        /// Collection name.
        collection: &'static str,
        /// Conflicting record ID.
        id: String,
    },

    /// A record could not be encoded, or a stored value does not decode
    /// as this collection's record.
    #[error("{collection} value at key {key:?} is not a valid record: {source}")]
    Serialization {
        /// Collection name.
        collection: &'static str,
        /// World-state key of the value.
        key: String,
        /// Underlying codec failure.
        #[source]
        source: CodecError,
    },

    /// The world state failed.
    #[error("failed to access world state: {0}")]
    Access(#[from] StateError),

    /// The record ID cannot be used as a key.
    #[error("invalid {collection} ID {id:?}: {reason}")]
    InvalidId {
        /// Collection name.
        collection: &'static str,
        /// Rejected ID.
        id: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl CoreError {
    /// Creates a not found error.
    pub fn not_found(collection: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }

    /// Creates an already exists error.
    pub fn already_exists(collection: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            collection,
            id: id.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialization(
        collection: &'static str,
        key: impl Into<String>,
        source: CodecError,
    ) -> Self {
        Self::Serialization {
            collection,
            key: key.into(),
            source,
        }
    }

    /// Returns true for [`CoreError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for [`CoreError::AlreadyExists`].
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_collection_and_id() {
        assert_eq!(
            CoreError::not_found("student", "student9").to_string(),
            "the student student9 does not exist"
        );
        assert_eq!(
            CoreError::already_exists("event", "e1").to_string(),
            "the event e1 already exists"
        );
    }

    #[test]
    fn access_errors_convert() {
        let err: CoreError = StateError::unavailable("peer down").into();
        assert!(matches!(err, CoreError::Access(_)));
        assert!(!err.is_not_found());
    }
}
