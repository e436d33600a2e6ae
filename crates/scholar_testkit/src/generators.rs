//! Property-based test generators using proptest.
//!
//! Provides strategies for generating records that satisfy the engine's
//! invariants: non-empty IDs and scalar fields of the declared kinds.

use proptest::prelude::*;
use scholar_codec::Value;
use scholar_core::{Certificate, Event, Project, Student};

/// Strategy for generating valid record IDs.
pub fn record_id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9]{0,11}").expect("Invalid regex")
}

/// Strategy for generating free-form text fields, including non-ASCII.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::string::string_regex("[A-Za-z ,/'.-]{0,24}").expect("Invalid regex"),
        1 => ".{0,16}",
    ]
}

/// Strategy for generating integer fields across the full range.
pub fn integer_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![
        4 => -30i64..3000,
        1 => any::<i64>(),
    ]
}

/// Strategy for generating students.
pub fn student_strategy() -> impl Strategy<Value = Student> {
    (
        (integer_strategy(), text_strategy(), record_id_strategy(), text_strategy()),
        (text_strategy(), integer_strategy(), text_strategy(), text_strategy()),
        (text_strategy(), text_strategy(), text_strategy(), text_strategy()),
    )
        .prop_map(
            |(
                (enrollment_year, full_name, id, speciality),
                (major, current_year, degree, university),
                (faculty, date_of_birth, place_of_birth, address),
            )| Student {
                enrollment_year,
                full_name,
                id,
                speciality,
                major,
                current_year,
                degree,
                university,
                faculty,
                date_of_birth,
                place_of_birth,
                address,
            },
        )
}

/// Strategy for generating certificates.
pub fn certificate_strategy() -> impl Strategy<Value = Certificate> {
    (
        (record_id_strategy(), record_id_strategy(), text_strategy()),
        (text_strategy(), text_strategy(), "[0-9a-f]{0,32}"),
        prop::array::uniform6(integer_strategy()),
        (integer_strategy(), text_strategy()),
    )
        .prop_map(
            |(
                (student_id, id, title),
                (issue_place, issue_date, doc_hash),
                s,
                (years_average, description),
            )| {
                Certificate {
                    student_id,
                    id,
                    title,
                    issue_place,
                    issue_date,
                    doc_hash,
                    semester1_average: s[0],
                    semester2_average: s[1],
                    semester3_average: s[2],
                    semester4_average: s[3],
                    semester5_average: s[4],
                    semester6_average: s[5],
                    years_average,
                    description,
                }
            },
        )
}

/// Strategy for generating projects.
pub fn project_strategy() -> impl Strategy<Value = Project> {
    (
        (record_id_strategy(), record_id_strategy(), text_strategy(), text_strategy()),
        (text_strategy(), text_strategy(), text_strategy(), "[0-9a-f]{0,32}"),
        text_strategy(),
        prop::array::uniform6(text_strategy()),
        (integer_strategy(), text_strategy()),
    )
        .prop_map(
            |(
                (student_id, id, title, advisor),
                (course, project_type, depose_date, repo_hash),
                url_path,
                [partner1, partner2, partner3, partner4, partner5, partner6],
                (grade, description),
            )| Project {
                student_id,
                id,
                title,
                advisor,
                course,
                project_type,
                depose_date,
                repo_hash,
                url_path,
                partner1,
                partner2,
                partner3,
                partner4,
                partner5,
                partner6,
                grade,
                description,
            },
        )
}

/// Strategy for generating events.
pub fn event_strategy() -> impl Strategy<Value = Event> {
    (
        record_id_strategy(),
        record_id_strategy(),
        text_strategy(),
        text_strategy(),
        text_strategy(),
        text_strategy(),
        text_strategy(),
    )
        .prop_map(
            |(student_id, id, title, location, join_date, organizer, description)| Event {
                student_id,
                id,
                title,
                location,
                join_date,
                organizer,
                description,
            },
        )
}

/// Strategy for generating arbitrary codec values, nested up to depth 3.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
        ".{0,12}".prop_map(Value::Text),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(|entries| {
                Value::Map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Value::Text(k), v))
                        .collect(),
                )
            }),
        ]
    })
}

/// Strategy for generating distinct, unordered ID sets.
pub fn id_set_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(record_id_strategy(), 1..=max)
        .prop_map(|ids| ids.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_core::Record;

    proptest! {
        #[test]
        fn test_record_ids_are_not_empty(id in record_id_strategy()) {
            prop_assert!(!id.is_empty());
        }

        #[test]
        fn test_generated_records_encode(
            student in student_strategy(),
            certificate in certificate_strategy(),
            project in project_strategy(),
            event in event_strategy(),
        ) {
            prop_assert!(student.encode().is_ok());
            prop_assert!(certificate.encode().is_ok());
            prop_assert!(project.encode().is_ok());
            prop_assert!(event.encode().is_ok());
        }

        #[test]
        fn test_id_sets_are_distinct(ids in id_set_strategy(8)) {
            let mut sorted = ids.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), ids.len());
        }
    }
}
