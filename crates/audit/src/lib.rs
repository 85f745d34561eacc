//! Audit trail: write-only append of every mutation.
//!
//! Entries are immutable facts consumed by history and reporting views.
//! Appending is best-effort: a failed append is logged and never rolls back
//! the business mutation it describes.

pub mod entry;
pub mod trail;

pub use entry::{AuditAction, AuditEntry};
pub use trail::{AuditError, AuditTrail, InMemoryAuditTrail};
