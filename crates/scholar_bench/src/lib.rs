//! Benchmark utilities.

use scholar_core::{Collection, Student};
use scholar_storage::InMemoryState;

/// Generate `count` distinct students with realistic field sizes.
pub fn generate_students(count: usize) -> Vec<Student> {
    (0..count)
        .map(|i| Student {
            enrollment_year: 2015 + (i % 8) as i64,
            full_name: format!("Student number {i}"),
            id: format!("student{i:06}"),
            speciality: "Info".into(),
            major: if i % 2 == 0 { "SI".into() } else { String::new() },
            current_year: 1 + (i % 5) as i64,
            degree: "Licence".into(),
            university: "Djillali Liabes".into(),
            faculty: "Sciences Exactes".into(),
            date_of_birth: "01/01/2000".into(),
            place_of_birth: "Oran".into(),
            address: "Sidi Bel abbes,Tassala".into(),
        })
        .collect()
}

/// A world state holding `count` generated students.
pub fn populated_state(count: usize) -> InMemoryState {
    let mut state = InMemoryState::new();
    let students = Collection::<Student>::default();
    for student in generate_students(count) {
        students
            .create(&mut state, &student)
            .expect("generated students have distinct IDs");
    }
    state
}
