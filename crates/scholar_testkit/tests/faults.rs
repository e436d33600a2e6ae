//! Access failures and all-or-nothing invocations.

use scholar_core::{CoreError, Record, StudentContract};
use scholar_storage::{invoke, InMemoryState, StateAccessor, StateError};
use scholar_testkit::prelude::*;

fn seeded_state() -> InMemoryState {
    TestLedger::seeded().state
}

fn assert_access(err: CoreError) {
    assert!(
        matches!(err, CoreError::Access(StateError::Unavailable { .. })),
        "expected access error, got {err:?}"
    );
}

#[test]
fn failing_get_surfaces_as_access() {
    let state = FaultyState::failing(seeded_state(), Primitive::Get);
    let contract = StudentContract::default();
    assert_access(contract.student_exists(&state, "student1").unwrap_err());
    assert_access(contract.read_student(&state, "student1").unwrap_err());
}

#[test]
fn failing_commit_leaves_state_untouched() {
    let mut state = FaultyState::failing(seeded_state(), Primitive::Apply);
    let before = state.inner().snapshot();
    let contract = StudentContract::default();

    assert_access(
        contract
            .transfer_student(&mut state, "student1", "USTO")
            .unwrap_err(),
    );
    assert_access(contract.delete_student(&mut state, "student2").unwrap_err());
    assert_eq!(state.inner().snapshot(), before);
    assert_eq!(state.failures(), 2);
}

#[test]
fn failing_scan_open() {
    let state = FaultyState::failing(seeded_state(), Primitive::Scan);
    assert_access(
        StudentContract::default()
            .get_all_students(&state)
            .unwrap_err(),
    );
    assert_eq!(state.inner().open_scans(), 0);
}

#[test]
fn failing_scan_item_releases_cursor() {
    let state = FaultyState::new(seeded_state()).fail_after(Primitive::ScanItem, 3);
    let err = StudentContract::default()
        .get_all_students(&state)
        .unwrap_err();
    assert_access(err);
    assert_eq!(state.failures(), 1);
    assert_eq!(state.inner().open_scans(), 0);
}

#[test]
fn rejected_seeding_writes_nothing() {
    let mut state = FaultyState::failing(InMemoryState::new(), Primitive::Apply);
    let err = StudentContract::default().init_ledger(&mut state).unwrap_err();
    assert_access(err);
    assert!(state.inner().is_empty());
}

#[test]
fn invocation_spanning_collections_rolls_back() {
    let mut ledger = TestLedger::seeded();
    let before = ledger.state.snapshot();
    let events = ledger.events.collection();
    let projects = ledger.projects.collection();

    let result: Result<(), CoreError> = invoke(&mut ledger.state, |inv| {
        events.create(inv, &sample_event())?;
        projects.create(inv, &sample_project())?;
        projects.create(inv, &sample_project())
    });
    assert!(result.unwrap_err().is_already_exists());
    assert_eq!(ledger.state.snapshot(), before);
}

#[test]
fn invocation_commits_on_success() {
    let mut ledger = TestLedger::seeded();
    let events = ledger.events.collection();
    let students = ledger.students.collection();

    let old: Result<String, CoreError> = invoke(&mut ledger.state, |inv| {
        events.create(inv, &sample_event())?;
        students.set_field(inv, "student2", scholar_core::Student::UNIVERSITY, "USTO".into())
    });
    assert_eq!(old.unwrap(), "Djillali Liabes");
    assert_eq!(
        ledger.state.get("EVENT#event1").unwrap(),
        Some(sample_event().encode().unwrap())
    );
    assert_eq!(
        ledger.students.read_student(&ledger.state, "student2").unwrap().university,
        "USTO"
    );
}
