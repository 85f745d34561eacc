use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timberledger_core::{Entity, EntityId, Money, Quantity};
use timberledger_parties::ManagerId;

use crate::order::OrderId;

/// Sale identifier. UUIDv7, so id order is creation order.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SaleId(pub EntityId);

impl SaleId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for SaleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Entity: a company sale of warehouse stock.
///
/// Append-only. When the sale is linked to a manager, `buyer` carries the
/// manager's display name and the manager sub-ledger computes resellable
/// stock against `sale_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub order_id: OrderId,
    pub buyer: String,
    pub sale_value: Quantity,
    pub sale_price: Money,
    pub date: DateTime<Utc>,
    pub manager_id: Option<ManagerId>,
}

impl Sale {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SaleId,
        order_id: OrderId,
        buyer: impl Into<String>,
        sale_value: Quantity,
        sale_price: Money,
        date: DateTime<Utc>,
        manager_id: Option<ManagerId>,
    ) -> Self {
        Self {
            id,
            order_id,
            buyer: buyer.into(),
            sale_value,
            sale_price,
            date,
            manager_id,
        }
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
