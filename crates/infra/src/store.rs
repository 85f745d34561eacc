//! The shared in-memory datastore.
//!
//! One `RwLock` over the whole [`State`] serializes every writer, which is
//! what makes the balance's check-then-spend sequence safe: no second
//! spender can pass the guard against cash the first one is committing.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use timberledger_core::{DomainResult, EntityId, Money};
use timberledger_debts::{SupplierDebt, SupplierDebtId};
use timberledger_items::{Item, ItemId};
use timberledger_ledger::{balance, Expense, Loan, LoanId};
use timberledger_managers::{ManagerSale, ManagerTransfer, TransferId};
use timberledger_orders::{Order, OrderId, Sale, SaleId};
use timberledger_parties::{Manager, ManagerId, Partner, PartnerId, Supplier, SupplierId};

use crate::error::{OpError, OpResult};

/// Every table in one place.
///
/// The ledger-walk tables (loans, debts) are keyed by their UUIDv7 ids, so
/// iterating a `BTreeMap` visits rows oldest-created-first; that iteration
/// order *is* the FIFO order the settlement walks rely on.
///
/// There is no secondary index on order numbers; create-order checks
/// uniqueness with a linear scan over `orders`. Add a
/// `HashMap<String, OrderId>` here if order volume ever makes that scan
/// noticeable.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub partners: HashMap<PartnerId, Partner>,
    pub suppliers: HashMap<SupplierId, Supplier>,
    pub managers: HashMap<ManagerId, Manager>,
    pub items: HashMap<ItemId, Item>,
    pub orders: BTreeMap<OrderId, Order>,
    pub loans: BTreeMap<LoanId, Loan>,
    pub expenses: Vec<Expense>,
    pub sales: BTreeMap<SaleId, Sale>,
    pub supplier_debts: BTreeMap<SupplierDebtId, SupplierDebt>,
    pub manager_sales: Vec<ManagerSale>,
    pub transfers: HashMap<TransferId, ManagerTransfer>,
}

impl State {
    /// Available cash, recomputed from the ledger tables on every call.
    pub fn balance(&self) -> DomainResult<Money> {
        balance(self.loans.values(), self.expenses.iter())
    }

    /// Balance with the named order's own funding loan left out.
    ///
    /// Pay-loan's guard uses this: the loan being paid off is the one that
    /// funded the purchase, so it must not count as spendable cash.
    pub fn balance_excluding_loan_for(&self, order: EntityId) -> DomainResult<Money> {
        balance(
            self.loans.values().filter(|l| l.order_ref != Some(order)),
            self.expenses.iter(),
        )
    }
}

/// Serialized, atomic, full-rollback transactions over [`State`].
#[derive(Debug, Default)]
pub struct Store {
    state: RwLock<State>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` against a draft copy of the state under the write lock and
    /// swap the draft in only if it returns `Ok`.
    ///
    /// Holding the write lock for the whole operation serializes writers;
    /// discarding the draft on `Err` gives full rollback with no partial
    /// application.
    pub fn transact<T>(&self, op: impl FnOnce(&mut State) -> OpResult<T>) -> OpResult<T> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| OpError::Internal("datastore lock poisoned".to_string()))?;
        let mut draft = guard.clone();
        let out = op(&mut draft)?;
        *guard = draft;
        Ok(out)
    }

    /// Read-only access to a consistent snapshot of the state.
    pub fn read<T>(&self, f: impl FnOnce(&State) -> OpResult<T>) -> OpResult<T> {
        let guard = self
            .state
            .read()
            .map_err(|_| OpError::Internal("datastore lock poisoned".to_string()))?;
        f(&guard)
    }
}
