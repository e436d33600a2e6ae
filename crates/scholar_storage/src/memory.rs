//! In-memory world state.

use crate::accessor::StateAccessor;
use crate::error::{StateError, StateResult};
use crate::invocation::WriteSet;
use crate::scan::RangeScan;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An in-memory world state.
///
/// This accessor keeps every key in an ordered map and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Embedding the record engine without a ledger host
///
/// Range scans snapshot the requested range when they are opened. The
/// number of scans not yet dropped is reported by [`open_scans`], which
/// lets tests prove that cursors are released on every path.
///
/// [`open_scans`]: InMemoryState::open_scans
///
/// # Example
///
/// ```rust
/// use scholar_storage::{InMemoryState, StateAccessor};
///
/// let mut state = InMemoryState::new();
/// state.put("b", vec![2]).unwrap();
/// state.put("a", vec![1]).unwrap();
///
/// let keys: Vec<String> = state
///     .range_scan("", "")
///     .unwrap()
///     .map(|entry| entry.unwrap().0)
///     .collect();
/// assert_eq!(keys, vec!["a", "b"]);
/// assert_eq!(state.open_scans(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryState {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    open_scans: AtomicUsize,
}

impl InMemoryState {
    /// Creates an empty world state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world state with pre-existing entries.
    ///
    /// Useful for seeding foreign or corrupted values in tests.
    #[must_use]
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<u8>)>,
        K: Into<String>,
    {
        Self {
            entries: RwLock::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            open_scans: AtomicUsize::new(0),
        }
    }

    /// Returns a copy of every entry.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.entries.read().clone()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the number of range scans that have not been dropped yet.
    #[must_use]
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::SeqCst)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.write().clear();
    }
}

pub(crate) fn validate_key(key: &str) -> StateResult<()> {
    if key.is_empty() {
        return Err(StateError::InvalidKey);
    }
    Ok(())
}

pub(crate) fn validate_range(start: &str, end: &str) -> StateResult<()> {
    if !start.is_empty() && !end.is_empty() && start > end {
        return Err(StateError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn range_bounds<'k>(start: &'k str, end: &'k str) -> (Bound<&'k str>, Bound<&'k str>) {
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start)
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end)
    };
    (lower, upper)
}

impl StateAccessor for InMemoryState {
    fn get(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> StateResult<()> {
        validate_key(key)?;
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StateResult<()> {
        validate_key(key)?;
        self.entries.write().remove(key);
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> StateResult<RangeScan<'_>> {
        validate_range(start, end)?;

        let entries: Vec<_> = self
            .entries
            .read()
            .range::<str, _>(range_bounds(start, end))
            .map(|(k, v)| Ok((k.clone(), v.clone())))
            .collect();

        self.open_scans.fetch_add(1, Ordering::SeqCst);
        let open_scans = &self.open_scans;
        Ok(RangeScan::new(entries).on_release(move || {
            open_scans.fetch_sub(1, Ordering::SeqCst);
        }))
    }

    fn apply(&mut self, writes: WriteSet) -> StateResult<()> {
        for key in writes.keys() {
            validate_key(key)?;
        }

        let mut entries = self.entries.write();
        for (key, value) in writes {
            match value {
                Some(bytes) => {
                    entries.insert(key, bytes);
                }
                None => {
                    entries.remove(&key);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(state: &InMemoryState, start: &str, end: &str) -> Vec<String> {
        state
            .range_scan(start, end)
            .unwrap()
            .map(|e| e.unwrap().0)
            .collect()
    }

    #[test]
    fn memory_new_is_empty() {
        let state = InMemoryState::new();
        assert!(state.is_empty());
        assert_eq!(state.len(), 0);
    }

    #[test]
    fn memory_get_absent_is_none() {
        let state = InMemoryState::new();
        assert_eq!(state.get("missing").unwrap(), None);
    }

    #[test]
    fn memory_put_then_get() {
        let mut state = InMemoryState::new();
        state.put("k", b"v1".to_vec()).unwrap();
        state.put("k", b"v2".to_vec()).unwrap();
        assert_eq!(state.get("k").unwrap(), Some(b"v2".to_vec()));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn memory_delete_removes_key() {
        let mut state = InMemoryState::new();
        state.put("k", b"v".to_vec()).unwrap();
        state.delete("k").unwrap();
        assert_eq!(state.get("k").unwrap(), None);
    }

    #[test]
    fn memory_delete_absent_is_noop() {
        let mut state = InMemoryState::new();
        assert!(state.delete("missing").is_ok());
    }

    #[test]
    fn memory_empty_key_rejected() {
        let mut state = InMemoryState::new();
        assert_eq!(state.get(""), Err(StateError::InvalidKey));
        assert_eq!(state.put("", vec![1]), Err(StateError::InvalidKey));
        assert_eq!(state.delete(""), Err(StateError::InvalidKey));
    }

    #[test]
    fn memory_full_scan_is_ordered() {
        let state = InMemoryState::with_entries(vec![
            ("c", vec![3]),
            ("a", vec![1]),
            ("b", vec![2]),
        ]);
        assert_eq!(keys(&state, "", ""), vec!["a", "b", "c"]);
    }

    #[test]
    fn memory_scan_bounds_are_half_open() {
        let state = InMemoryState::with_entries(vec![
            ("a", vec![]),
            ("b", vec![]),
            ("c", vec![]),
            ("d", vec![]),
        ]);
        assert_eq!(keys(&state, "b", "d"), vec!["b", "c"]);
        assert_eq!(keys(&state, "b", ""), vec!["b", "c", "d"]);
        assert_eq!(keys(&state, "", "b"), vec!["a"]);
        assert!(keys(&state, "b", "b").is_empty());
    }

    #[test]
    fn memory_scan_inverted_range_fails() {
        let state = InMemoryState::new();
        assert!(matches!(
            state.range_scan("z", "a"),
            Err(StateError::InvalidRange { .. })
        ));
        assert_eq!(state.open_scans(), 0);
    }

    #[test]
    fn memory_open_scans_tracked() {
        let state = InMemoryState::with_entries(vec![("a", vec![]), ("b", vec![])]);
        let mut scan = state.range_scan("", "").unwrap();
        assert_eq!(state.open_scans(), 1);
        assert!(scan.next().is_some());
        drop(scan);
        assert_eq!(state.open_scans(), 0);
    }

    #[test]
    fn memory_apply_batch() {
        let mut state = InMemoryState::with_entries(vec![("gone", vec![0])]);
        let mut writes = WriteSet::new();
        writes.put("a", vec![1]);
        writes.delete("gone");
        state.apply(writes).unwrap();

        assert_eq!(state.get("a").unwrap(), Some(vec![1]));
        assert_eq!(state.get("gone").unwrap(), None);
    }

    #[test]
    fn memory_apply_rejects_invalid_key_without_partial_write() {
        let mut state = InMemoryState::new();
        let mut writes = WriteSet::new();
        writes.put("", vec![1]);
        writes.put("a", vec![1]);

        assert_eq!(state.apply(writes), Err(StateError::InvalidKey));
        assert!(state.is_empty());
    }

    #[test]
    fn memory_clear() {
        let mut state = InMemoryState::with_entries(vec![("a", vec![1])]);
        state.clear();
        assert!(state.is_empty());
    }
}
