use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timberledger_core::{DomainError, DomainResult, Entity, EntityId, Quantity};
use timberledger_items::ItemId;
use timberledger_parties::SupplierId;

/// Supplier debt identifier. UUIDv7, so id order is creation order.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SupplierDebtId(pub EntityId);

impl SupplierDebtId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for SupplierDebtId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// How a netted debt quantity is applied to the new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NettingMode {
    /// The netted quantity's cash value (at the new order's unit price) is
    /// subtracted from the new order's total price.
    Subtract,
    /// The netted quantity is added to the new order's value at no cost
    /// (goods delivered now that were already paid for earlier).
    AddToOrder,
}

/// Entity: goods a supplier still owes from an under-delivered order.
///
/// Invariant: `debt_value >= 0`; settlement only ever reduces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierDebt {
    pub id: SupplierDebtId,
    pub supplier_id: SupplierId,
    pub item_id: ItemId,
    /// The order whose delivery fell short.
    pub order_ref: EntityId,
    pub debt_value: Quantity,
    pub is_settled: bool,
    pub settled_at: Option<DateTime<Utc>>,
}

impl SupplierDebt {
    pub fn new(
        id: SupplierDebtId,
        supplier_id: SupplierId,
        item_id: ItemId,
        order_ref: EntityId,
        debt_value: Quantity,
    ) -> DomainResult<Self> {
        if !debt_value.is_positive() {
            return Err(DomainError::validation(
                "supplier debt must be a positive quantity",
            ));
        }
        Ok(Self {
            id,
            supplier_id,
            item_id,
            order_ref,
            debt_value,
            is_settled: false,
            settled_at: None,
        })
    }

    pub fn matches(&self, supplier_id: SupplierId, item_id: ItemId) -> bool {
        self.supplier_id == supplier_id && self.item_id == item_id
    }

    /// Settle up to `requested` units, returning what was actually settled.
    ///
    /// Reduces `debt_value`, never below zero; hitting zero marks the row
    /// settled with a timestamp.
    pub fn settle_up_to(
        &mut self,
        requested: Quantity,
        now: DateTime<Utc>,
    ) -> DomainResult<Quantity> {
        if self.is_settled || !requested.is_positive() {
            return Ok(Quantity::ZERO);
        }
        let taken = requested.min(self.debt_value);
        self.debt_value = self.debt_value.checked_sub(taken)?;
        if self.debt_value.is_zero() {
            self.is_settled = true;
            self.settled_at = Some(now);
        }
        Ok(taken)
    }
}

impl Entity for SupplierDebt {
    type Id = SupplierDebtId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Walk `debts` in the order given (oldest-created-first) and settle up to
/// `requested` units across them, exhausting older debts before newer ones.
///
/// Returns the total quantity actually netted (≤ `requested`).
pub fn settle_fifo<'a>(
    debts: impl IntoIterator<Item = &'a mut SupplierDebt>,
    requested: Quantity,
    now: DateTime<Utc>,
) -> DomainResult<Quantity> {
    let mut remaining = requested;
    let mut netted = Quantity::ZERO;

    for debt in debts {
        if remaining.is_zero() {
            break;
        }
        let taken = debt.settle_up_to(remaining, now)?;
        remaining = remaining.checked_sub(taken)?;
        netted = netted.checked_add(taken)?;
    }

    Ok(netted)
}
