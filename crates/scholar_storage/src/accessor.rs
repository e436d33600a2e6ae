//! World-state accessor trait definition.

use crate::error::StateResult;
use crate::invocation::WriteSet;
use crate::scan::RangeScan;

/// Access to the ledger host's world state.
///
/// Accessors are **opaque byte stores** keyed by strings. They do not know
/// about records, schemas or encodings; the record engine owns all of that.
///
/// # Invariants
///
/// - `get` returns exactly the bytes last written by `put` for that key
/// - `delete` on an absent key is a no-op
/// - `range_scan` yields keys in ascending lexicographic order
/// - A [`RangeScan`] holds host resources until it is dropped
///
/// # Implementors
///
/// - [`super::InMemoryState`] - For tests and embedding
/// - [`super::Invocation`] - Staged view used for all-or-nothing writes
pub trait StateAccessor {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the host fails.
    fn get(&self, key: &str) -> StateResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the host fails.
    fn put(&mut self, key: &str, value: Vec<u8>) -> StateResult<()>;

    /// Removes `key` from the world state.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the host fails.
    fn delete(&mut self, key: &str) -> StateResult<()>;

    /// Scans the keys in `[start, end)`.
    ///
    /// An empty `start` means "from the first key" and an empty `end`
    /// means "through the last key", so `range_scan("", "")` visits the
    /// whole keyspace.
    ///
    /// # Errors
    ///
    /// Returns an error if `start > end` (both non-empty) or the host fails.
    /// Individual items may also carry host errors.
    fn range_scan(&self, start: &str, end: &str) -> StateResult<RangeScan<'_>>;

    /// Applies a staged write set.
    ///
    /// The default implementation replays the writes one by one in key
    /// order, remembering each key's prior value. If a write fails, the
    /// keys already touched are restored before the error is returned.
    /// Hosts that can apply a batch atomically should override it.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `get`, `put` or `delete`.
    fn apply(&mut self, writes: WriteSet) -> StateResult<()> {
        let mut undo: Vec<(String, Option<Vec<u8>>)> = Vec::with_capacity(writes.len());
        for (key, value) in writes {
            let outcome = self.get(&key).and_then(|prior| {
                undo.push((key.clone(), prior));
                match value {
                    Some(bytes) => self.put(&key, bytes),
                    None => self.delete(&key),
                }
            });
            if let Err(err) = outcome {
                restore(self, undo);
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Puts back the prior values of a partially applied write set, newest first.
///
/// Restoration is best effort: a host that failed once may fail again, and
/// the original error is the one worth reporting.
fn restore<S: StateAccessor + ?Sized>(state: &mut S, undo: Vec<(String, Option<Vec<u8>>)>) {
    for (key, prior) in undo.into_iter().rev() {
        let _ = match prior {
            Some(bytes) => state.put(&key, bytes),
            None => state.delete(&key),
        };
    }
}
