//! Fixed record encoding vectors.
//!
//! Every peer executing a contract must write the same bytes for the same
//! record. These vectors pin the exact encodings so that any change to a
//! schema or to the codec shows up as a test failure.

use crate::fixtures::{reference_student, sample_event};
use scholar_core::Record;
use serde::{Deserialize, Serialize};

/// A record encoding pinned to its expected bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Collection the bytes belong to.
    pub collection: String,
    /// Expected encoding (hex-encoded).
    pub expected_hex: String,
}

/// A stored value that no collection accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Stored bytes (hex-encoded).
    pub input_hex: String,
}

/// Encodings of the fixture records.
pub fn record_vectors() -> Vec<RecordVector> {
    vec![
        RecordVector {
            id: "event_hackathon".into(),
            description: "sample_event(), empty description".into(),
            collection: "event".into(),
            expected_hex: "a76953747564656e7449446873747564656e7432624944666576656e7431655469746c65\
                           694861636b6174686f6e684c6f636174696f6e644f72616e684a6f696e446174656a3033\
                           2f30332f32303232694f7267616e697a6572645553544f6b4465736372697074696f6e60"
                .into(),
        },
        RecordVector {
            id: "student1_reference".into(),
            description: "reference student1, integers in 1 and 3 byte heads".into(),
            collection: "student".into(),
            expected_hex: "ac6e456e726f6c6c6d656e74596561721907e26846756c6c4e616d65674d6f68616d6564\
                           6249446873747564656e74316a5370656369616c697479644d617468654d616a6f726b50\
                           726f626162696c6974656b43757272656e74596561720266446567726565664d61737465\
                           726a556e69766572736974796f446a696c6c616c69204c696162657367466163756c7479\
                           70536369656e63657320457861637465736b446174654f6642697274686a31322f30362f\
                           313939376c506c6163654f664269727468664368656c6566674164647265\
                           737376536964692042656c2061626265732c54617373616c61"
                .into(),
        },
    ]
}

/// Values that must be rejected by every collection.
pub fn foreign_vectors() -> Vec<ForeignVector> {
    vec![
        ForeignVector {
            id: "json_document".into(),
            description: "a JSON document, as an untyped writer would store it".into(),
            input_hex: hex_encode(br#"{"ID":"student1","FullName":"Mohamed"}"#),
        },
        ForeignVector {
            id: "cbor_array".into(),
            description: "array(2) [1, 2]".into(),
            input_hex: "820102".into(),
        },
        ForeignVector {
            id: "record_with_trailing_byte".into(),
            description: "map(1) {\"ID\": \"x\"} followed by 0x00".into(),
            input_hex: "a1624944617800".into(),
        },
        ForeignVector {
            id: "empty".into(),
            description: "zero-length value".into(),
            input_hex: String::new(),
        },
    ]
}

/// Encodes the fixture record named by a vector.
///
/// # Panics
///
/// Panics if the vector ID is unknown.
pub fn encode_vector_record(vector: &RecordVector) -> Vec<u8> {
    let encoded = match vector.id.as_str() {
        "event_hackathon" => sample_event().encode(),
        "student1_reference" => reference_student("student1").encode(),
        other => panic!("no fixture for vector {other}"),
    };
    encoded.expect("fixture records encode")
}

/// Returns all vectors as JSON.
pub fn all_vectors_json() -> String {
    serde_json::to_string_pretty(&serde_json::json!({
        "records": record_vectors(),
        "foreign": foreign_vectors(),
    }))
    .unwrap_or_default()
}

/// Encodes bytes as hexadecimal string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decodes hexadecimal string to bytes.
///
/// # Panics
///
/// Panics on malformed hex.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    let hex = hex.replace([' ', '\n', '\r'], "");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_core::{Certificate, Event, Project, Student};

    #[test]
    fn test_record_vectors_match_codec() {
        for vector in record_vectors() {
            assert_eq!(
                hex_encode(&encode_vector_record(&vector)),
                hex_encode(&hex_decode(&vector.expected_hex)),
                "vector {} drifted",
                vector.id
            );
        }
    }

    #[test]
    fn test_record_vectors_read_by_ciborium() {
        for vector in record_vectors() {
            let bytes = hex_decode(&vector.expected_hex);
            let parsed: ciborium::value::Value =
                ciborium::de::from_reader(&bytes[..]).expect("valid CBOR");
            let entries = parsed.as_map().expect("record is a map");
            let id = entries
                .iter()
                .find(|(k, _)| k.as_text() == Some("ID"))
                .and_then(|(_, v)| v.as_text());
            assert!(id.is_some(), "vector {} has no ID", vector.id);
        }
    }

    #[test]
    fn test_student_vector_field_order() {
        let bytes = hex_decode(&record_vectors()[1].expected_hex);
        let parsed: ciborium::value::Value = ciborium::de::from_reader(&bytes[..]).unwrap();
        let keys: Vec<&str> = parsed
            .as_map()
            .unwrap()
            .iter()
            .filter_map(|(k, _)| k.as_text())
            .collect();
        let declared: Vec<&str> = Student::SCHEMA.fields.iter().map(|f| f.name).collect();
        assert_eq!(keys, declared);
    }

    #[test]
    fn test_foreign_vectors_rejected_everywhere() {
        for vector in foreign_vectors() {
            let bytes = hex_decode(&vector.input_hex);
            assert!(Student::decode(&bytes).is_err(), "{}", vector.id);
            assert!(Certificate::decode(&bytes).is_err(), "{}", vector.id);
            assert!(Project::decode(&bytes).is_err(), "{}", vector.id);
            assert!(Event::decode(&bytes).is_err(), "{}", vector.id);
        }
    }

    #[test]
    fn test_all_vectors_json() {
        let json = all_vectors_json();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["records"].as_array().map(Vec::len), Some(2));
        assert_eq!(parsed["foreign"].as_array().map(Vec::len), Some(4));
    }
}
