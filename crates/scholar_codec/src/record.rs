//! Schema-ordered record encoding.
//!
//! A record is one definite-length CBOR map. Its keys are the layout's
//! field names in declared order and each value is a text or integer
//! scalar. Unlike generic maps, record entries are not re-sorted: the
//! layout order is the canonical order, so two implementations sharing a
//! layout produce identical bytes.
//!
//! Decoding is strict. The entry count, every key and every value kind must
//! match the layout exactly, and no bytes may follow the map. Anything else
//! is reported as a [`CodecError`], which is how values written under a
//! different schema are detected.

use crate::decoder::CanonicalDecoder;
use crate::encoder::CanonicalEncoder;
use crate::error::{CodecError, CodecResult};
use crate::value::Value;
use std::fmt;

/// The scalar kind stored in one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// UTF-8 text.
    Text,
    /// Signed 64-bit integer.
    Integer,
}

impl FieldKind {
    /// Returns true if `value` has this kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (FieldKind::Text, Value::Text(_)) | (FieldKind::Integer, Value::Integer(_))
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => f.write_str("text"),
            FieldKind::Integer => f.write_str("integer"),
        }
    }
}

/// One named slot in a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Encoded field name.
    pub name: &'static str,
    /// Scalar kind of the field.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// A text field.
    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    /// An integer field.
    #[must_use]
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
        }
    }
}

/// Encode `values` as a record laid out by `layout`.
///
/// `values[i]` is written under `layout[i].name`.
///
/// # Errors
///
/// Returns [`CodecError::FieldCount`] if the lengths differ and
/// [`CodecError::FieldType`] if a value has the wrong kind.
pub fn encode_record(layout: &[FieldSpec], values: &[Value]) -> CodecResult<Vec<u8>> {
    if values.len() != layout.len() {
        return Err(CodecError::FieldCount {
            expected: layout.len(),
            actual: values.len() as u64,
        });
    }

    let mut encoder = CanonicalEncoder::with_capacity(layout.len() * 24);
    encoder.encode_map_header(layout.len());
    for (spec, value) in layout.iter().zip(values) {
        check_kind(spec, value)?;
        encoder.encode_text(spec.name);
        encoder.encode(value)?;
    }
    Ok(encoder.into_bytes())
}

/// Decode a record laid out by `layout`.
///
/// The returned values are in layout order.
///
/// # Errors
///
/// Returns an error if `bytes` is not valid CBOR or does not match the
/// layout exactly.
pub fn decode_record(layout: &[FieldSpec], bytes: &[u8]) -> CodecResult<Vec<Value>> {
    let mut decoder = CanonicalDecoder::new(bytes);

    let count = decoder.read_map_header()?.map_err(|found| CodecError::NotARecord {
        found: found.kind_name().to_string(),
    })?;
    if count != layout.len() as u64 {
        return Err(CodecError::FieldCount {
            expected: layout.len(),
            actual: count,
        });
    }

    let mut values = Vec::with_capacity(layout.len());
    for (position, spec) in layout.iter().enumerate() {
        let name = decoder
            .read_text()?
            .map_err(|found| unexpected_field(position, spec, format!("<{}>", found.kind_name())))?;
        if name != spec.name {
            return Err(unexpected_field(position, spec, name));
        }

        let value = decoder.decode()?;
        check_kind(spec, &value)?;
        values.push(value);
    }

    decoder.finish()?;
    Ok(values)
}

fn check_kind(spec: &FieldSpec, value: &Value) -> CodecResult<()> {
    if spec.kind.matches(value) {
        return Ok(());
    }
    Err(CodecError::FieldType {
        field: spec.name.to_string(),
        expected: spec.kind,
        found: value.kind_name().to_string(),
    })
}

fn unexpected_field(position: usize, spec: &FieldSpec, found: String) -> CodecError {
    CodecError::UnexpectedField {
        position,
        expected: spec.name.to_string(),
        found,
    }
}
