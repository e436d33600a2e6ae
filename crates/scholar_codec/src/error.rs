//! Error types for the codec crate.

use crate::record::FieldKind;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Float values are forbidden in canonical CBOR.
    #[error("float values are forbidden in canonical CBOR")]
    FloatForbidden,

    /// Indefinite-length items are forbidden.
    #[error("indefinite-length items are forbidden")]
    IndefiniteLengthForbidden,

    /// Invalid UTF-8 string.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    /// Unexpected end of input.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Input continues after the top-level item.
    #[error("{count} trailing bytes after top-level item")]
    TrailingBytes {
        /// Number of unread bytes.
        count: usize,
    },

    /// Invalid CBOR structure.
    #[error("invalid CBOR structure: {message}")]
    InvalidStructure {
        /// Description of the structural error.
        message: String,
    },

    /// Unsupported CBOR type.
    #[error("unsupported CBOR type: {type_name}")]
    UnsupportedType {
        /// Name of the unsupported type.
        type_name: String,
    },

    /// Integer does not fit in an `i64`.
    #[error("integer overflow")]
    IntegerOverflow,

    /// A length header claims more than the decoder accepts.
    #[error("size limit exceeded: claimed {claimed}, max {max_allowed}")]
    SizeLimitExceeded {
        /// Length claimed by the header.
        claimed: u64,
        /// Largest accepted length.
        max_allowed: u64,
    },

    /// The top-level item is not a record map.
    #[error("expected a record map, found {found}")]
    NotARecord {
        /// CBOR type that was found instead.
        found: String,
    },

    /// The record has the wrong number of fields.
    #[error("record field count mismatch: expected {expected}, found {actual}")]
    FieldCount {
        /// Number of fields in the layout.
        expected: usize,
        /// Number of fields present.
        actual: u64,
    },

    /// A field name does not match the layout at its position.
    #[error("unexpected field at position {position}: expected {expected:?}, found {found:?}")]
    UnexpectedField {
        /// Zero-based position in the layout.
        position: usize,
        /// Name declared by the layout.
        expected: String,
        /// Name (or CBOR type) found in the input.
        found: String,
    },

    /// A field value has the wrong kind.
    #[error("field {field:?} must be {expected}, found {found}")]
    FieldType {
        /// Field name.
        field: String,
        /// Kind declared by the layout.
        expected: FieldKind,
        /// CBOR type that was found.
        found: String,
    },
}

impl CodecError {
    /// Create an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    /// Create an unsupported type error.
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }
}
