//! # Scholar Codec
//!
//! Deterministic CBOR encoding for Scholar Ledger records.
//!
//! Every peer that executes a contract must produce the same bytes for the
//! same record, otherwise endorsements disagree. This crate guarantees:
//! - Identical inputs produce identical bytes
//! - Cross-platform consistency
//! - Strict decoding that rejects values written under another schema
//!
//! ## Canonical CBOR Rules
//!
//! - Integers and lengths use the shortest encoding
//! - Generic maps are sorted by encoded key (length-first, then bytewise)
//! - Record maps follow their layout order (see [`record`](crate::encode_record))
//! - Strings must be UTF-8
//! - No floats, tags or indefinite-length items
//!
//! ## Usage
//!
//! ```
//! use scholar_codec::{decode_record, encode_record, FieldSpec, Value};
//!
//! const LAYOUT: &[FieldSpec] = &[FieldSpec::text("ID"), FieldSpec::integer("Grade")];
//!
//! let bytes = encode_record(LAYOUT, &[Value::from("p1"), Value::from(17i64)]).unwrap();
//! let values = decode_record(LAYOUT, &bytes).unwrap();
//! assert_eq!(values[1], Value::Integer(17));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;
mod record;
mod value;

pub use decoder::{from_cbor, CanonicalDecoder};
pub use encoder::{to_canonical_cbor, CanonicalEncoder};
pub use error::{CodecError, CodecResult};
pub use record::{decode_record, encode_record, FieldKind, FieldSpec};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: Value) {
        let bytes = to_canonical_cbor(&value).unwrap();
        assert_eq!(from_cbor(&bytes).unwrap(), value);
    }

    #[test]
    fn roundtrip_scalars() {
        roundtrip(Value::Null);
        roundtrip(Value::Bool(true));
        roundtrip(Value::Integer(-100));
        roundtrip(Value::Integer(i64::MIN));
        roundtrip(Value::Text("Sidi Bel abbes,Tassala".into()));
        roundtrip(Value::Bytes(vec![0, 255]));
    }

    #[test]
    fn roundtrip_nested() {
        roundtrip(Value::Map(vec![
            (Value::from("a"), Value::Array(vec![Value::Integer(1), Value::Null])),
            (Value::from("bb"), Value::Map(vec![(Value::from("c"), Value::from("d"))])),
        ]));
    }

    #[test]
    fn deterministic_generic_maps() {
        let forward = Value::Map(vec![
            (Value::from("z"), Value::Integer(1)),
            (Value::from("a"), Value::Integer(2)),
        ]);
        let backward = Value::Map(vec![
            (Value::from("a"), Value::Integer(2)),
            (Value::from("z"), Value::Integer(1)),
        ]);
        assert_eq!(
            to_canonical_cbor(&forward).unwrap(),
            to_canonical_cbor(&backward).unwrap()
        );
    }
}
