//! # Scholar Core
//!
//! Record engine for the Scholar Ledger contracts.
//!
//! This crate provides:
//! - Schema descriptors and the [`Record`] trait
//! - [`Collection`], one generic CRUD engine instantiated per record type
//! - [`Field`] accessors for single-field mutation with old-value return
//! - The student, certificate, project and event records
//! - Contract facades exposing the named ledger operations
//!
//! Every operation receives the world state explicitly as a
//! [`StateAccessor`](scholar_storage::StateAccessor); nothing is global.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
pub mod contract;
pub mod entities;
mod error;
mod field;
mod record;
mod schema;

pub use collection::Collection;
pub use config::{Config, ForeignValuePolicy, KeySpace};
pub use contract::{CertificateContract, EventContract, ProjectContract, StudentContract};
pub use entities::{Certificate, Event, Project, Student};
pub use error::{CoreError, CoreResult};
pub use field::Field;
pub use record::{FieldReader, Record};
pub use schema::{FieldKind, FieldSpec, Schema};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
