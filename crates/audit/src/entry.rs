use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use timberledger_core::{ActorId, EntityId};

/// What kind of mutation an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    OrderCreated,
    OrderLoanPaid,
    OrderTransportationPaid,
    OrderCustomsPaid,
    OrderSplit,
    OrderSold,
    OrderValueIncreased,
    LoanCreated,
    LoanRepaid,
    SupplierDebtCreated,
    SupplierDebtSettled,
    ManagerResale,
    TransferRequested,
    TransferApproved,
    TransferRejected,
    MoneyTakenFromManager,
}

impl AuditAction {
    /// Stable action name for reporting/filter views.
    pub fn name(&self) -> &'static str {
        match self {
            AuditAction::OrderCreated => "order.created",
            AuditAction::OrderLoanPaid => "order.loan_paid",
            AuditAction::OrderTransportationPaid => "order.transportation_paid",
            AuditAction::OrderCustomsPaid => "order.customs_paid",
            AuditAction::OrderSplit => "order.split",
            AuditAction::OrderSold => "order.sold",
            AuditAction::OrderValueIncreased => "order.value_increased",
            AuditAction::LoanCreated => "loan.created",
            AuditAction::LoanRepaid => "loan.repaid",
            AuditAction::SupplierDebtCreated => "supplier_debt.created",
            AuditAction::SupplierDebtSettled => "supplier_debt.settled",
            AuditAction::ManagerResale => "manager.resale",
            AuditAction::TransferRequested => "transfer.requested",
            AuditAction::TransferApproved => "transfer.approved",
            AuditAction::TransferRejected => "transfer.rejected",
            AuditAction::MoneyTakenFromManager => "manager.money_taken",
        }
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    entry_id: Uuid,
    action: AuditAction,
    /// The primary entity the mutation touched.
    entity_ref: EntityId,
    actor: Option<ActorId>,
    occurred_at: DateTime<Utc>,
    /// Free-form details (amounts, counterparties, quantities).
    details: JsonValue,
}

impl AuditEntry {
    pub fn new(
        action: AuditAction,
        entity_ref: EntityId,
        actor: Option<ActorId>,
        occurred_at: DateTime<Utc>,
        details: JsonValue,
    ) -> Self {
        Self {
            entry_id: Uuid::now_v7(),
            action,
            entity_ref,
            actor,
            occurred_at,
            details,
        }
    }

    pub fn entry_id(&self) -> Uuid {
        self.entry_id
    }

    pub fn action(&self) -> AuditAction {
        self.action
    }

    pub fn entity_ref(&self) -> EntityId {
        self.entity_ref
    }

    pub fn actor(&self) -> Option<ActorId> {
        self.actor
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn details(&self) -> &JsonValue {
        &self.details
    }
}
