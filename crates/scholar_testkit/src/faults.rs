//! Fault injection for world-state accessors.
//!
//! [`FaultyState`] wraps any accessor and makes one chosen primitive fail,
//! either on its first call or after a number of successful calls. It is
//! used to drive the access-error and rollback paths of the contracts.

use scholar_storage::{RangeScan, StateAccessor, StateError, StateResult, WriteSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// An accessor primitive that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// `get`.
    Get,
    /// `put`.
    Put,
    /// `delete`.
    Delete,
    /// Opening a range scan.
    Scan,
    /// An item yielded by a range scan.
    ScanItem,
    /// Applying a committed write set.
    Apply,
}

/// An accessor that injects [`StateError::Unavailable`] failures.
#[derive(Debug)]
pub struct FaultyState<S> {
    inner: S,
    target: Option<Primitive>,
    fail_after: usize,
    calls: AtomicUsize,
    failures: AtomicUsize,
}

impl<S: StateAccessor> FaultyState<S> {
    /// Wraps `inner` without injecting anything.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            target: None,
            fail_after: 0,
            calls: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        }
    }

    /// Wraps `inner` so that every call to `primitive` fails.
    pub fn failing(inner: S, primitive: Primitive) -> Self {
        Self::new(inner).fail_after(primitive, 0)
    }

    /// Lets `successes` calls to `primitive` through, then fails the rest.
    ///
    /// For [`Primitive::ScanItem`] the count is per scan: the item at index
    /// `successes` is replaced by an error.
    #[must_use]
    pub fn fail_after(mut self, primitive: Primitive, successes: usize) -> Self {
        self.target = Some(primitive);
        self.fail_after = successes;
        self.calls = AtomicUsize::new(0);
        self
    }

    /// Stops injecting failures.
    pub fn heal(&mut self) {
        self.target = None;
    }

    /// Number of failures injected so far.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    /// The wrapped accessor.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps the accessor.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn check(&self, primitive: Primitive) -> StateResult<()> {
        if self.target != Some(primitive) {
            return Ok(());
        }
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.fail_after {
            return Ok(());
        }
        Err(self.inject(primitive))
    }

    fn inject(&self, primitive: Primitive) -> StateError {
        self.failures.fetch_add(1, Ordering::SeqCst);
        StateError::unavailable(format!("injected {primitive:?} failure"))
    }
}

impl<S: StateAccessor> StateAccessor for FaultyState<S> {
    fn get(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        self.check(Primitive::Get)?;
        self.inner.get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> StateResult<()> {
        self.check(Primitive::Put)?;
        self.inner.put(key, value)
    }

    fn delete(&mut self, key: &str) -> StateResult<()> {
        self.check(Primitive::Delete)?;
        self.inner.delete(key)
    }

    fn range_scan(&self, start: &str, end: &str) -> StateResult<RangeScan<'_>> {
        self.check(Primitive::Scan)?;
        let scan = self.inner.range_scan(start, end)?;
        if self.target != Some(Primitive::ScanItem) {
            return Ok(scan);
        }

        let fail_at = self.fail_after;
        Ok(RangeScan::new(scan.enumerate().map(move |(index, entry)| {
            if index == fail_at {
                return Err(self.inject(Primitive::ScanItem));
            }
            entry
        })))
    }

    fn apply(&mut self, writes: WriteSet) -> StateResult<()> {
        self.check(Primitive::Apply)?;
        self.inner.apply(writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_storage::InMemoryState;

    #[test]
    fn test_no_faults_by_default() {
        let mut state = FaultyState::new(InMemoryState::new());
        state.put("a", vec![1]).unwrap();
        assert_eq!(state.get("a").unwrap(), Some(vec![1]));
        assert_eq!(state.failures(), 0);
    }

    #[test]
    fn test_fail_after_successes() {
        let state = FaultyState::new(InMemoryState::with_entries(vec![("a", vec![1])]))
            .fail_after(Primitive::Get, 2);
        assert!(state.get("a").is_ok());
        assert!(state.get("a").is_ok());
        assert!(matches!(state.get("a"), Err(StateError::Unavailable { .. })));
        assert_eq!(state.failures(), 1);
    }

    #[test]
    fn test_scan_item_failure_releases_inner_scan() {
        let state = FaultyState::new(InMemoryState::with_entries(vec![
            ("a", vec![1]),
            ("b", vec![2]),
        ]))
        .fail_after(Primitive::ScanItem, 1);

        let items: Vec<_> = state.range_scan("", "").unwrap().collect();
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
        assert_eq!(state.inner().open_scans(), 0);
    }

    #[test]
    fn test_heal() {
        let mut state = FaultyState::failing(InMemoryState::new(), Primitive::Put);
        assert!(state.put("a", vec![1]).is_err());
        state.heal();
        state.put("a", vec![1]).unwrap();
        assert_eq!(state.into_inner().len(), 1);
    }
}
