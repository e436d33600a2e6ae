//! All-or-nothing invocation scope.
//!
//! The ledger host commits the writes of an invocation only if the whole
//! invocation succeeds. [`invoke`] reproduces that contract on top of any
//! [`StateAccessor`]: writes are staged in a [`WriteSet`] and applied once
//! the invocation returns `Ok`.

use crate::accessor::StateAccessor;
use crate::error::{StateError, StateResult};
use crate::memory::{range_bounds, validate_key, validate_range};
use crate::scan::RangeScan;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Pending writes keyed by world-state key.
///
/// `Some(bytes)` is a put, `None` is a delete. Later writes to the same key
/// replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    writes: BTreeMap<String, Option<Vec<u8>>>,
}

impl WriteSet {
    /// Creates an empty write set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a put.
    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.writes.insert(key.into(), Some(value));
    }

    /// Stages a delete.
    pub fn delete(&mut self, key: impl Into<String>) {
        self.writes.insert(key.into(), None);
    }

    /// Looks up a staged write.
    ///
    /// Returns `None` if the key is untouched, `Some(None)` if it is staged
    /// for deletion.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&[u8]>> {
        self.writes.get(key).map(Option::as_deref)
    }

    /// Returns the staged keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.writes.keys().map(String::as_str)
    }

    /// Returns the number of staged keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Returns true if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Folds `other` into this set, `other` winning on shared keys.
    pub fn merge(&mut self, other: WriteSet) {
        self.writes.extend(other.writes);
    }
}

impl IntoIterator for WriteSet {
    type Item = (String, Option<Vec<u8>>);
    type IntoIter = btree_map::IntoIter<String, Option<Vec<u8>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

/// A staged view over a world state.
///
/// Reads see the invocation's own staged writes first and fall back to the
/// underlying state. Nothing reaches the underlying state until
/// [`commit`](Invocation::commit); dropping the invocation discards the
/// staged writes.
#[derive(Debug)]
pub struct Invocation<'a, S: StateAccessor + ?Sized> {
    state: &'a mut S,
    writes: WriteSet,
}

impl<'a, S: StateAccessor + ?Sized> Invocation<'a, S> {
    /// Opens an invocation over `state`.
    pub fn new(state: &'a mut S) -> Self {
        Self {
            state,
            writes: WriteSet::new(),
        }
    }

    /// Returns the writes staged so far.
    #[must_use]
    pub fn writes(&self) -> &WriteSet {
        &self.writes
    }

    /// Applies the staged writes to the underlying state.
    ///
    /// # Errors
    ///
    /// Returns the underlying state's error if the batch is rejected.
    pub fn commit(self) -> StateResult<()> {
        if self.writes.is_empty() {
            return Ok(());
        }
        self.state.apply(self.writes)
    }
}

impl<S: StateAccessor + ?Sized> StateAccessor for Invocation<'_, S> {
    fn get(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        validate_key(key)?;
        match self.writes.get(key) {
            Some(staged) => Ok(staged.map(<[u8]>::to_vec)),
            None => self.state.get(key),
        }
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> StateResult<()> {
        validate_key(key)?;
        self.writes.put(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StateResult<()> {
        validate_key(key)?;
        self.writes.delete(key);
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> StateResult<RangeScan<'_>> {
        validate_range(start, end)?;

        let mut merged = BTreeMap::new();
        {
            // The underlying cursor is released at the end of this block.
            let base = self.state.range_scan(start, end)?;
            for entry in base {
                let (key, value) = entry?;
                merged.insert(key, value);
            }
        }

        for (key, staged) in self.writes.writes.range::<str, _>(range_bounds(start, end)) {
            match staged {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        Ok(RangeScan::new(merged.into_iter().map(Ok)))
    }

    fn apply(&mut self, writes: WriteSet) -> StateResult<()> {
        for key in writes.keys() {
            validate_key(key)?;
        }
        self.writes.merge(writes);
        Ok(())
    }
}

/// Runs `f` as one all-or-nothing invocation against `state`.
///
/// The staged writes are applied when `f` returns `Ok`, and discarded when
/// it returns `Err`, leaving `state` exactly as it was.
///
/// # Errors
///
/// Returns the error produced by `f`, or the commit error converted into `E`.
///
/// # Example
///
/// ```rust
/// use scholar_storage::{invoke, InMemoryState, StateAccessor, StateError};
///
/// let mut state = InMemoryState::new();
/// let result: Result<(), StateError> = invoke(&mut state, |inv| {
///     inv.put("a", vec![1])?;
///     Err(StateError::unavailable("peer went away"))
/// });
/// assert!(result.is_err());
/// assert!(state.is_empty());
/// ```
pub fn invoke<S, R, E, F>(state: &mut S, f: F) -> Result<R, E>
where
    S: StateAccessor + ?Sized,
    E: From<StateError>,
    F: FnOnce(&mut Invocation<'_, S>) -> Result<R, E>,
{
    let mut invocation = Invocation::new(state);
    let result = f(&mut invocation)?;
    invocation.commit()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryState;

    fn scan_keys<S: StateAccessor>(state: &S) -> Vec<String> {
        state
            .range_scan("", "")
            .unwrap()
            .map(|e| e.unwrap().0)
            .collect()
    }

    #[test]
    fn writes_invisible_until_commit() {
        let mut state = InMemoryState::new();
        let mut inv = Invocation::new(&mut state);
        inv.put("a", vec![1]).unwrap();
        assert_eq!(inv.get("a").unwrap(), Some(vec![1]));
        inv.commit().unwrap();
        assert_eq!(state.get("a").unwrap(), Some(vec![1]));
    }

    #[test]
    fn dropped_invocation_discards_writes() {
        let mut state = InMemoryState::with_entries(vec![("keep", vec![0])]);
        {
            let mut inv = Invocation::new(&mut state);
            inv.put("a", vec![1]).unwrap();
            inv.delete("keep").unwrap();
        }
        assert_eq!(state.get("a").unwrap(), None);
        assert_eq!(state.get("keep").unwrap(), Some(vec![0]));
    }

    #[test]
    fn staged_delete_hides_existing_value() {
        let mut state = InMemoryState::with_entries(vec![("a", vec![1])]);
        let mut inv = Invocation::new(&mut state);
        inv.delete("a").unwrap();
        assert_eq!(inv.get("a").unwrap(), None);
    }

    #[test]
    fn scan_merges_staged_writes() {
        let mut state = InMemoryState::with_entries(vec![
            ("a", vec![1]),
            ("b", vec![2]),
            ("d", vec![4]),
        ]);
        let mut inv = Invocation::new(&mut state);
        inv.delete("b").unwrap();
        inv.put("c", vec![3]).unwrap();
        inv.put("d", vec![40]).unwrap();

        let entries: Vec<_> = inv
            .range_scan("", "")
            .unwrap()
            .map(|e| e.unwrap())
            .collect();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), vec![1]),
                ("c".to_string(), vec![3]),
                ("d".to_string(), vec![40]),
            ]
        );
    }

    #[test]
    fn scan_releases_underlying_cursor() {
        let mut state = InMemoryState::with_entries(vec![("a", vec![1])]);
        {
            let inv = Invocation::new(&mut state);
            let scan = inv.range_scan("", "").unwrap();
            drop(scan);
        }
        assert_eq!(state.open_scans(), 0);
    }

    #[test]
    fn invoke_commits_on_success() {
        let mut state = InMemoryState::new();
        let out: Result<u8, StateError> = invoke(&mut state, |inv| {
            inv.put("x", vec![9])?;
            Ok(7)
        });
        assert_eq!(out, Ok(7));
        assert_eq!(scan_keys(&state), vec!["x"]);
    }

    #[test]
    fn invoke_rolls_back_on_error() {
        let mut state = InMemoryState::with_entries(vec![("a", vec![1])]);
        let before = state.snapshot();
        let out: Result<(), StateError> = invoke(&mut state, |inv| {
            inv.put("b", vec![2])?;
            inv.delete("a")?;
            Err(StateError::unavailable("boom"))
        });
        assert!(out.is_err());
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn nested_invocation_folds_into_parent() {
        let mut state = InMemoryState::new();
        let out: Result<(), StateError> = invoke(&mut state, |outer| {
            invoke(outer, |inner| inner.put("n", vec![1]))?;
            assert_eq!(outer.get("n")?, Some(vec![1]));
            Ok(())
        });
        assert!(out.is_ok());
        assert_eq!(state.get("n").unwrap(), Some(vec![1]));
    }

    #[test]
    fn write_set_last_write_wins() {
        let mut writes = WriteSet::new();
        writes.put("k", vec![1]);
        writes.delete("k");
        assert_eq!(writes.get("k"), Some(None));
        writes.put("k", vec![2]);
        assert_eq!(writes.get("k"), Some(Some(&[2u8][..])));
        assert_eq!(writes.len(), 1);
    }
}
