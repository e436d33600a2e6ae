//! Scoped range-scan iterator.

use crate::error::StateResult;
use std::fmt;

/// One `(key, value)` pair produced by a range scan.
pub type ScanEntry = (String, Vec<u8>);

/// An ordered iterator over a key range.
///
/// The scan owns a host-side cursor. The cursor is released exactly once,
/// when the scan is dropped, whether iteration finished, stopped early or
/// bailed out on an error.
pub struct RangeScan<'a> {
    entries: Box<dyn Iterator<Item = StateResult<ScanEntry>> + 'a>,
    release: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> RangeScan<'a> {
    /// Creates a scan over already ordered entries.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = StateResult<ScanEntry>>,
        I::IntoIter: 'a,
    {
        Self {
            entries: Box::new(entries.into_iter()),
            release: None,
        }
    }

    /// Creates a scan that yields nothing.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Registers the hook that frees the host cursor.
    #[must_use]
    pub fn on_release<F>(mut self, release: F) -> Self
    where
        F: FnOnce() + 'a,
    {
        self.release = Some(Box::new(release));
        self
    }

    /// Releases the scan now instead of at the end of the scope.
    pub fn close(self) {}
}

impl Iterator for RangeScan<'_> {
    type Item = StateResult<ScanEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }
}

impl Drop for RangeScan<'_> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for RangeScan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeScan")
            .field("has_release", &self.release.is_some())
            .finish_non_exhaustive()
    }
}

/// Returns true if `key` falls in `[start, end)`, empty bounds being open.
#[must_use]
pub fn key_in_range(key: &str, start: &str, end: &str) -> bool {
    (start.is_empty() || key >= start) && (end.is_empty() || key < end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn entry(key: &str) -> StateResult<ScanEntry> {
        Ok((key.to_string(), key.as_bytes().to_vec()))
    }

    #[test]
    fn yields_entries_in_given_order() {
        let keys: Vec<String> = RangeScan::new(vec![entry("a"), entry("b")])
            .map(|e| e.unwrap().0)
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn release_runs_once_on_drop() {
        let released = Cell::new(0);
        {
            let mut scan = RangeScan::new(vec![entry("a"), entry("b")])
                .on_release(|| released.set(released.get() + 1));
            assert!(scan.next().is_some());
        }
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn close_releases_immediately() {
        let released = Cell::new(false);
        let scan = RangeScan::empty().on_release(|| released.set(true));
        scan.close();
        assert!(released.get());
    }

    #[test]
    fn range_bounds() {
        assert!(key_in_range("b", "", ""));
        assert!(key_in_range("b", "b", "c"));
        assert!(!key_in_range("c", "b", "c"));
        assert!(!key_in_range("a", "b", ""));
        assert!(key_in_range("STUDENT#x", "STUDENT#", "STUDENT$"));
        assert!(!key_in_range("STUDENTS", "STUDENT#", "STUDENT$"));
    }
}
