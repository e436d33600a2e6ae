//! Reference records and test ledgers.

use scholar_core::{
    CertificateContract, Config, EventContract, ProjectContract, StudentContract,
};
use scholar_core::{Certificate, Event, Project, Student};
use scholar_storage::InMemoryState;

pub use scholar_core::contract::reference_students;

/// The seeded student with the given ID, e.g. `"student1"`.
///
/// # Panics
///
/// Panics if `id` is not one of the six reference students.
#[must_use]
pub fn reference_student(id: &str) -> Student {
    reference_students()
        .into_iter()
        .find(|s| s.id == id)
        .unwrap_or_else(|| panic!("{id} is not a reference student"))
}

/// A certificate held by `student1`.
#[must_use]
pub fn sample_certificate() -> Certificate {
    Certificate {
        student_id: "student1".into(),
        id: "cert1".into(),
        title: "Licence Mathematiques".into(),
        issue_place: "Sidi Bel Abbes".into(),
        issue_date: "30/06/2018".into(),
        doc_hash: "5d41402abc4b2a76b9719d911017c592".into(),
        semester1_average: 12,
        semester2_average: 13,
        semester3_average: 11,
        semester4_average: 14,
        semester5_average: 15,
        semester6_average: 13,
        years_average: 13,
        description: "Mention assez bien".into(),
    }
}

/// A two-person project owned by `student4`.
#[must_use]
pub fn sample_project() -> Project {
    Project {
        student_id: "student4".into(),
        id: "proj1".into(),
        title: "Student registry on a permissioned ledger".into(),
        advisor: "Dr. Benali".into(),
        course: "Systemes d'information".into(),
        project_type: "Memoire".into(),
        depose_date: "15/06/2022".into(),
        repo_hash: "e3b0c44298fc1c149afbf4c8996fb924".into(),
        url_path: "/projects/proj1".into(),
        partner1: "student2".into(),
        grade: 16,
        ..Project::default()
    }
}

/// An event joined by `student2`.
#[must_use]
pub fn sample_event() -> Event {
    Event {
        student_id: "student2".into(),
        id: "event1".into(),
        title: "Hackathon".into(),
        location: "Oran".into(),
        join_date: "03/03/2022".into(),
        organizer: "USTO".into(),
        description: String::new(),
    }
}

/// A world state together with the four contracts sharing it.
#[derive(Debug, Default)]
pub struct TestLedger {
    /// The world state.
    pub state: InMemoryState,
    /// Student operations.
    pub students: StudentContract,
    /// Certificate operations.
    pub certificates: CertificateContract,
    /// Project operations.
    pub projects: ProjectContract,
    /// Event operations.
    pub events: EventContract,
}

impl TestLedger {
    /// Creates an empty ledger with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ledger whose contracts use `config`.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            state: InMemoryState::new(),
            students: StudentContract::new(config),
            certificates: CertificateContract::new(config),
            projects: ProjectContract::new(config),
            events: EventContract::new(config),
        }
    }

    /// Creates a ledger holding the reference students.
    ///
    /// # Panics
    ///
    /// Panics if seeding fails.
    #[must_use]
    pub fn seeded() -> Self {
        let mut ledger = Self::new();
        ledger
            .students
            .init_ledger(&mut ledger.state)
            .expect("seeding an empty ledger");
        ledger
    }

    /// Creates a seeded ledger that also holds the sample certificate,
    /// project and event.
    ///
    /// # Panics
    ///
    /// Panics if any write fails.
    #[must_use]
    pub fn populated() -> Self {
        let mut ledger = Self::seeded();
        ledger
            .certificates
            .collection()
            .create(&mut ledger.state, &sample_certificate())
            .expect("storing sample certificate");
        ledger
            .projects
            .collection()
            .create(&mut ledger.state, &sample_project())
            .expect("storing sample project");
        ledger
            .events
            .collection()
            .create(&mut ledger.state, &sample_event())
            .expect("storing sample event");
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_student_lookup() {
        assert_eq!(reference_student("student5").full_name, "Jenice");
    }

    #[test]
    #[should_panic(expected = "not a reference student")]
    fn test_unknown_reference_student() {
        let _ = reference_student("student42");
    }

    #[test]
    fn test_populated_ledger() {
        let ledger = TestLedger::populated();
        assert_eq!(ledger.state.len(), 9);
        assert!(ledger.events.event_exists(&ledger.state, "event1").unwrap());
        assert_eq!(
            ledger.projects.read_project(&ledger.state, "proj1").unwrap(),
            sample_project()
        );
    }
}
