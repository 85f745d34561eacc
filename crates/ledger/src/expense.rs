use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timberledger_core::{Entity, EntityId, Money};

/// Expense identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExpenseId(pub EntityId);

impl ExpenseId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// What a cash-flow entry was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Order,
    Transportation,
    Customs,
    Other,
}

/// Entity: one immutable, sign-bearing cash-flow entry.
///
/// Positive `amount` is an outflow, negative an inflow. Expenses are never
/// updated or deleted once written; corrections are new entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    amount: Money,
    description: String,
    expense_type: ExpenseType,
    order_ref: Option<EntityId>,
    occurred_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        amount: Money,
        description: impl Into<String>,
        expense_type: ExpenseType,
        order_ref: Option<EntityId>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            amount,
            description: description.into(),
            expense_type,
            order_ref,
            occurred_at,
        }
    }

    pub fn id_typed(&self) -> ExpenseId {
        self.id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expense_type(&self) -> ExpenseType {
        self.expense_type
    }

    pub fn order_ref(&self) -> Option<EntityId> {
        self.order_ref
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
