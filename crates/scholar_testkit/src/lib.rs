//! # Scholar Testkit
//!
//! Test utilities for Scholar Ledger.
//!
//! This crate provides:
//! - Reference records and a ready-made test ledger
//! - Property-based test generators using proptest
//! - A fault-injecting world state for error and rollback paths
//! - Fixed record encoding vectors, checked against an independent decoder
//!
//! ## Usage
//!
//! ```rust
//! use scholar_testkit::prelude::*;
//!
//! let ledger = TestLedger::seeded();
//! let all = ledger.students.get_all_students(&ledger.state).unwrap();
//! assert_eq!(all.len(), 6);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}
