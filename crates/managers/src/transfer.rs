use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timberledger_core::{ActorId, DomainError, DomainResult, Entity, EntityId, Money};
use timberledger_parties::{ManagerId, PartnerId};

/// Transfer identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TransferId(pub EntityId);

impl TransferId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for TransferId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Where the transferred cash goes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum TransferDestination {
    Company,
    Partner(PartnerId),
}

/// Transfer lifecycle. Approved and rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Approved,
    Rejected,
}

/// Entity: a manager's request to move cash back to the company or to a
/// partner, gated by admin approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerTransfer {
    pub id: TransferId,
    pub manager_id: ManagerId,
    pub destination: TransferDestination,
    pub amount: Money,
    pub description: String,
    pub status: TransferStatus,
    pub approver: Option<ActorId>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl ManagerTransfer {
    /// A manager-initiated transfer; starts `pending`.
    pub fn request(
        id: TransferId,
        manager_id: ManagerId,
        destination: TransferDestination,
        amount: Money,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        if amount.is_negative() || amount.is_zero() {
            return Err(DomainError::validation("transfer amount must be positive"));
        }
        Ok(Self {
            id,
            manager_id,
            destination,
            amount,
            description: description.into(),
            status: TransferStatus::Pending,
            approver: None,
            decided_at: None,
        })
    }

    /// An admin-initiated "take": recorded already approved.
    pub fn taken(
        id: TransferId,
        manager_id: ManagerId,
        amount: Money,
        description: impl Into<String>,
        approver: ActorId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let mut transfer = Self::request(
            id,
            manager_id,
            TransferDestination::Company,
            amount,
            description,
        )?;
        transfer.status = TransferStatus::Approved;
        transfer.approver = Some(approver);
        transfer.decided_at = Some(now);
        Ok(transfer)
    }

    fn ensure_pending(&self) -> DomainResult<()> {
        if self.status != TransferStatus::Pending {
            return Err(DomainError::conflict(format!(
                "transfer was already processed ({:?})",
                self.status
            )));
        }
        Ok(())
    }

    pub fn approve(&mut self, approver: ActorId, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_pending()?;
        self.status = TransferStatus::Approved;
        self.approver = Some(approver);
        self.decided_at = Some(now);
        Ok(())
    }

    pub fn reject(&mut self, approver: ActorId, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_pending()?;
        self.status = TransferStatus::Rejected;
        self.approver = Some(approver);
        self.decided_at = Some(now);
        Ok(())
    }
}

impl Entity for ManagerTransfer {
    type Id = TransferId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
