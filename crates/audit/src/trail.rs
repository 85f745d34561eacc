use std::sync::RwLock;

use thiserror::Error;

use crate::entry::AuditEntry;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit trail unavailable: {0}")]
    Unavailable(String),
}

/// Append-only audit sink.
///
/// Callers append *after* their transaction commits and treat failures as
/// non-fatal (log and continue) — the trail is an observability surface,
/// not a correctness dependency.
pub trait AuditTrail: Send + Sync {
    fn append(&self, entry: AuditEntry) -> Result<(), AuditError>;

    /// All entries, oldest first.
    fn entries(&self) -> Result<Vec<AuditEntry>, AuditError>;
}

/// In-memory audit trail.
#[derive(Debug, Default)]
pub struct InMemoryAuditTrail {
    entries: RwLock<Vec<AuditEntry>>,
}

impl InMemoryAuditTrail {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditTrail for InMemoryAuditTrail {
    fn append(&self, entry: AuditEntry) -> Result<(), AuditError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AuditError::Unavailable("lock poisoned".to_string()))?;
        entries.push(entry);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<AuditEntry>, AuditError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AuditError::Unavailable("lock poisoned".to_string()))?;
        Ok(entries.clone())
    }
}
