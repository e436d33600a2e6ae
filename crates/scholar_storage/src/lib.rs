//! # Scholar Storage
//!
//! World-state accessor contract for Scholar Ledger.
//!
//! The ledger host owns the world state: an ordered map from string keys to
//! opaque byte values. This crate describes what the record engine needs
//! from that host and ships an in-memory host for tests and embedding.
//!
//! ## Design Principles
//!
//! - Accessors are opaque byte stores keyed by UTF-8 strings
//! - Range scans return keys in ascending lexicographic order
//! - Scans are scoped resources released on drop
//! - All writes of one invocation commit together or not at all
//!
//! ## Available Accessors
//!
//! - [`InMemoryState`] - `BTreeMap`-backed world state
//! - [`Invocation`] - staged view over another accessor, see [`invoke`]
//!
//! ## Example
//!
//! ```rust
//! use scholar_storage::{InMemoryState, StateAccessor};
//!
//! let mut state = InMemoryState::new();
//! state.put("student1", b"payload".to_vec()).unwrap();
//! assert_eq!(state.get("student1").unwrap(), Some(b"payload".to_vec()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod accessor;
mod error;
mod invocation;
mod memory;
mod scan;

pub use accessor::StateAccessor;
pub use error::{StateError, StateResult};
pub use invocation::{invoke, Invocation, WriteSet};
pub use memory::InMemoryState;
pub use scan::{key_in_range, RangeScan, ScanEntry};
