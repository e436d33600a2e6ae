//! Named ledger operations.
//!
//! Each contract wraps one [`Collection`](crate::Collection) and exposes the
//! operations a dispatcher calls by name, with their fixed argument order.
//! Every write runs inside [`invoke`](scholar_storage::invoke), so a failing
//! operation leaves the world state untouched.

mod certificate;
mod event;
mod project;
mod student;

pub use certificate::CertificateContract;
pub use event::EventContract;
pub use project::ProjectContract;
pub use student::{reference_students, StudentContract};
