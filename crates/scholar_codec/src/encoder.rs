//! Canonical CBOR encoder.

use crate::error::CodecResult;
use crate::value::Value;
use std::cmp::Ordering;

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_NEGATIVE: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_TEXT: u8 = 3;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;

/// Encode a value to canonical CBOR bytes.
///
/// The output follows the canonical rules of RFC 8949 Section 4.2.1:
/// - Integers and lengths use the shortest possible head
/// - Map keys are sorted by their encoded form (length-first, then bytewise)
/// - No indefinite-length encoding
///
/// # Errors
///
/// Returns an error if a nested value cannot be encoded.
pub fn to_canonical_cbor(value: &Value) -> CodecResult<Vec<u8>> {
    let mut encoder = CanonicalEncoder::new();
    encoder.encode(value)?;
    Ok(encoder.into_bytes())
}

/// A canonical CBOR encoder.
///
/// Besides whole values, the encoder exposes the low-level heads that the
/// record layer needs to write a map whose entries follow schema order.
#[derive(Debug, Default)]
pub struct CanonicalEncoder {
    buffer: Vec<u8>,
}

impl CanonicalEncoder {
    /// Create a new encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new encoder with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Encode a value.
    ///
    /// # Errors
    ///
    /// Returns an error if a nested value cannot be encoded.
    pub fn encode(&mut self, value: &Value) -> CodecResult<()> {
        match value {
            // Simple values 20 (false), 21 (true) and 22 (null).
            Value::Null => self.buffer.push(0xf6),
            Value::Bool(b) => self.buffer.push(if *b { 0xf5 } else { 0xf4 }),
            Value::Integer(n) => self.encode_integer(*n),
            Value::Bytes(b) => {
                self.write_head(MAJOR_BYTES, b.len() as u64);
                self.buffer.extend_from_slice(b);
            }
            Value::Text(s) => self.encode_text(s),
            Value::Array(items) => {
                self.write_head(MAJOR_ARRAY, items.len() as u64);
                for item in items {
                    self.encode(item)?;
                }
            }
            Value::Map(pairs) => self.encode_sorted_map(pairs)?,
        }
        Ok(())
    }

    /// Encode a signed integer.
    #[allow(clippy::cast_sign_loss)]
    pub fn encode_integer(&mut self, n: i64) {
        if n >= 0 {
            self.write_head(MAJOR_UNSIGNED, n as u64);
        } else {
            // -1 - n is in [0, i64::MAX] for every negative n.
            self.write_head(MAJOR_NEGATIVE, (-1 - n) as u64);
        }
    }

    /// Encode a text string.
    pub fn encode_text(&mut self, text: &str) {
        self.write_head(MAJOR_TEXT, text.len() as u64);
        self.buffer.extend_from_slice(text.as_bytes());
    }

    /// Write the head of a definite-length map with `len` entries.
    ///
    /// The caller must follow it with exactly `len` key/value pairs.
    pub fn encode_map_header(&mut self, len: usize) {
        self.write_head(MAJOR_MAP, len as u64);
    }

    /// Consume this encoder and return the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Get a reference to the encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_head(&mut self, major: u8, arg: u64) {
        let mt = major << 5;
        if arg < 24 {
            self.buffer.push(mt | arg as u8);
        } else if arg <= u64::from(u8::MAX) {
            self.buffer.push(mt | 24);
            self.buffer.push(arg as u8);
        } else if arg <= u64::from(u16::MAX) {
            self.buffer.push(mt | 25);
            self.buffer.extend_from_slice(&(arg as u16).to_be_bytes());
        } else if arg <= u64::from(u32::MAX) {
            self.buffer.push(mt | 26);
            self.buffer.extend_from_slice(&(arg as u32).to_be_bytes());
        } else {
            self.buffer.push(mt | 27);
            self.buffer.extend_from_slice(&arg.to_be_bytes());
        }
    }

    fn encode_sorted_map(&mut self, pairs: &[(Value, Value)]) -> CodecResult<()> {
        let mut keyed = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            keyed.push((to_canonical_cbor(key)?, value));
        }
        keyed.sort_by(|a, b| cmp_encoded(&a.0, &b.0));

        self.encode_map_header(pairs.len());
        for (key, value) in keyed {
            self.buffer.extend_from_slice(&key);
            self.encode(value)?;
        }
        Ok(())
    }
}

/// Canonical ordering of encoded items: shorter first, then bytewise.
pub(crate) fn cmp_encoded(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(value: Value) -> Vec<u8> {
        to_canonical_cbor(&value).unwrap()
    }

    #[test]
    fn encode_simple_values() {
        assert_eq!(enc(Value::Null), vec![0xf6]);
        assert_eq!(enc(Value::Bool(false)), vec![0xf4]);
        assert_eq!(enc(Value::Bool(true)), vec![0xf5]);
    }

    #[test]
    fn encode_integer_heads_use_shortest_form() {
        assert_eq!(enc(Value::Integer(0)), vec![0x00]);
        assert_eq!(enc(Value::Integer(23)), vec![0x17]);
        assert_eq!(enc(Value::Integer(24)), vec![0x18, 24]);
        assert_eq!(enc(Value::Integer(2018)), vec![0x19, 0x07, 0xe2]);
        assert_eq!(enc(Value::Integer(65536)), vec![0x1a, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(
            enc(Value::Integer(i64::MAX)),
            vec![0x1b, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn encode_negative_integers() {
        assert_eq!(enc(Value::Integer(-1)), vec![0x20]);
        assert_eq!(enc(Value::Integer(-25)), vec![0x38, 24]);
        assert_eq!(
            enc(Value::Integer(i64::MIN)),
            vec![0x3b, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn encode_text_and_bytes() {
        assert_eq!(enc(Value::Text(String::new())), vec![0x60]);
        assert_eq!(enc(Value::Text("USTO".into())), vec![0x64, b'U', b'S', b'T', b'O']);
        assert_eq!(enc(Value::Bytes(vec![1, 2, 3])), vec![0x43, 1, 2, 3]);
    }

    #[test]
    fn encode_array() {
        assert_eq!(
            enc(Value::Array(vec![Value::Integer(1), Value::Integer(2)])),
            vec![0x82, 0x01, 0x02]
        );
    }

    #[test]
    fn generic_maps_are_sorted() {
        let map = Value::Map(vec![
            (Value::from("bb"), Value::Integer(2)),
            (Value::from("a"), Value::Integer(1)),
        ]);
        assert_eq!(enc(map), vec![0xa2, 0x61, b'a', 0x01, 0x62, b'b', b'b', 0x02]);
    }

    #[test]
    fn map_header_written_verbatim() {
        let mut encoder = CanonicalEncoder::with_capacity(8);
        encoder.encode_map_header(2);
        encoder.encode_text("b");
        encoder.encode_integer(1);
        encoder.encode_text("a");
        encoder.encode_integer(2);
        assert_eq!(
            encoder.as_bytes(),
            &[0xa2, 0x61, b'b', 0x01, 0x61, b'a', 0x02]
        );
    }
}
