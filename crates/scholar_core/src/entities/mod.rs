//! Record types stored on the ledger.
//!
//! Each record maps one-to-one onto a [`Schema`](crate::Schema). The schema
//! field order is the stored encoding order, and the serde names are the
//! presentation names used when records are rendered as JSON.

mod certificate;
mod event;
mod project;
mod student;

pub use certificate::Certificate;
pub use event::Event;
pub use project::Project;
pub use student::Student;
