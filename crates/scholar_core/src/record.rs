//! The record trait and field-level decoding helpers.

use crate::schema::Schema;
use scholar_codec::{decode_record, encode_record, CodecError, CodecResult, FieldKind, Value};
use std::vec;

/// A type stored as one world-state value.
///
/// Implementors describe themselves with a static [`Schema`] and convert to
/// and from values in schema order. Encoding and decoding come for free.
///
/// # Example
///
/// ```rust
/// use scholar_core::{FieldReader, Record, Schema};
/// use scholar_codec::{CodecResult, FieldSpec, Value};
///
/// struct Badge {
///     id: String,
///     level: i64,
/// }
///
/// impl Record for Badge {
///     const SCHEMA: &'static Schema = &Schema {
///         name: "badge",
///         key_prefix: "BADGE",
///         fields: &[FieldSpec::text("ID"), FieldSpec::integer("Level")],
///         key_field: 0,
///     };
///
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn to_values(&self) -> Vec<Value> {
///         vec![Value::from(&self.id), Value::from(self.level)]
///     }
///
///     fn from_values(values: Vec<Value>) -> CodecResult<Self> {
///         let mut fields = FieldReader::new(Self::SCHEMA, values);
///         let badge = Badge { id: fields.text()?, level: fields.integer()? };
///         fields.finish()?;
///         Ok(badge)
///     }
/// }
///
/// let bytes = Badge { id: "b1".into(), level: 3 }.encode().unwrap();
/// assert_eq!(Badge::decode(&bytes).unwrap().level, 3);
/// ```
pub trait Record: Sized {
    /// Field layout and key definition.
    const SCHEMA: &'static Schema;

    /// The record ID.
    fn id(&self) -> &str;

    /// Field values in schema order.
    fn to_values(&self) -> Vec<Value>;

    /// Rebuilds a record from values in schema order.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is missing or of the wrong kind.
    fn from_values(values: Vec<Value>) -> CodecResult<Self>;

    /// Encodes the record.
    ///
    /// # Errors
    ///
    /// Returns an error if [`to_values`](Record::to_values) disagrees with
    /// the schema.
    fn encode(&self) -> CodecResult<Vec<u8>> {
        encode_record(Self::SCHEMA.fields, &self.to_values())
    }

    /// Decodes a record.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a record of this schema.
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        Self::from_values(decode_record(Self::SCHEMA.fields, bytes)?)
    }
}

/// Hands out decoded values one field at a time, in schema order.
#[derive(Debug)]
pub struct FieldReader {
    schema: &'static Schema,
    values: vec::IntoIter<Value>,
    position: usize,
}

impl FieldReader {
    /// Starts reading `values` laid out by `schema`.
    #[must_use]
    pub fn new(schema: &'static Schema, values: Vec<Value>) -> Self {
        Self {
            schema,
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Takes the next field as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the values ran out or the next one is not text.
    pub fn text(&mut self) -> CodecResult<String> {
        match self.next(FieldKind::Text)? {
            Value::Text(s) => Ok(s),
            other => Err(self.kind_error(FieldKind::Text, &other)),
        }
    }

    /// Takes the next field as an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the values ran out or the next one is not an
    /// integer.
    pub fn integer(&mut self) -> CodecResult<i64> {
        match self.next(FieldKind::Integer)? {
            Value::Integer(n) => Ok(n),
            other => Err(self.kind_error(FieldKind::Integer, &other)),
        }
    }

    /// Checks that every value was consumed.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::FieldCount`] if values are left over.
    pub fn finish(self) -> CodecResult<()> {
        let left = self.values.len();
        if left == 0 {
            return Ok(());
        }
        Err(CodecError::FieldCount {
            expected: self.schema.len(),
            actual: (self.position + left) as u64,
        })
    }

    fn next(&mut self, kind: FieldKind) -> CodecResult<Value> {
        let value = self.values.next().ok_or_else(|| CodecError::FieldCount {
            expected: self.schema.len(),
            actual: self.position as u64,
        })?;
        self.position += 1;
        if self.schema.fields.get(self.position - 1).map(|f| f.kind) != Some(kind) {
            return Err(CodecError::invalid_structure(format!(
                "{} field {} read as {kind}",
                self.schema.name,
                self.position - 1
            )));
        }
        Ok(value)
    }

    fn kind_error(&self, expected: FieldKind, found: &Value) -> CodecError {
        let field = self
            .schema
            .fields
            .get(self.position - 1)
            .map_or("?", |f| f.name);
        CodecError::FieldType {
            field: field.to_string(),
            expected,
            found: found.kind_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_codec::FieldSpec;

    const PAIR: Schema = Schema {
        name: "pair",
        key_prefix: "PAIR",
        fields: &[FieldSpec::text("ID"), FieldSpec::integer("Count")],
        key_field: 0,
    };

    #[test]
    fn reader_takes_fields_in_order() {
        let mut reader = FieldReader::new(&PAIR, vec![Value::from("a"), Value::from(4i64)]);
        assert_eq!(reader.text().unwrap(), "a");
        assert_eq!(reader.integer().unwrap(), 4);
        reader.finish().unwrap();
    }

    #[test]
    fn reader_reports_missing_values() {
        let mut reader = FieldReader::new(&PAIR, vec![Value::from("a")]);
        reader.text().unwrap();
        assert!(matches!(
            reader.integer(),
            Err(CodecError::FieldCount { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn reader_reports_wrong_kind() {
        let mut reader = FieldReader::new(&PAIR, vec![Value::from(1i64), Value::from(4i64)]);
        assert!(matches!(
            reader.text(),
            Err(CodecError::FieldType { expected: FieldKind::Text, .. })
        ));
    }

    #[test]
    fn reader_rejects_leftovers() {
        let mut reader = FieldReader::new(
            &PAIR,
            vec![Value::from("a"), Value::from(4i64), Value::Null],
        );
        reader.text().unwrap();
        reader.integer().unwrap();
        assert!(matches!(
            reader.finish(),
            Err(CodecError::FieldCount { expected: 2, actual: 3 })
        ));
    }
}
