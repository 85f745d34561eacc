//! Read surface over the store: derived values and table listings.
//!
//! Reads take the read lock and recompute derived figures (the balance is
//! never cached); listings come back in creation order where the table is
//! keyed by a UUIDv7 id.

use timberledger_audit::AuditEntry;
use timberledger_core::{Money, Quantity};
use timberledger_debts::SupplierDebt;
use timberledger_items::Item;
use timberledger_ledger::Loan;
use timberledger_managers::{available_stock, ManagerSale, ManagerTransfer};
use timberledger_orders::{Order, OrderId, Sale};
use timberledger_parties::{Manager, ManagerId, Partner, Supplier};

use crate::error::{OpError, OpResult};
use crate::ops::TradeOps;

impl TradeOps {
    /// The derived available cash figure.
    pub fn balance(&self) -> OpResult<Money> {
        self.store().read(|state| Ok(state.balance()?))
    }

    pub fn order(&self, id: OrderId) -> OpResult<Order> {
        self.store()
            .read(|state| state.orders.get(&id).cloned().ok_or(OpError::NotFound))
    }

    pub fn orders(&self) -> OpResult<Vec<Order>> {
        self.store()
            .read(|state| Ok(state.orders.values().cloned().collect()))
    }

    pub fn loans(&self) -> OpResult<Vec<Loan>> {
        self.store()
            .read(|state| Ok(state.loans.values().cloned().collect()))
    }

    pub fn sales(&self) -> OpResult<Vec<Sale>> {
        self.store()
            .read(|state| Ok(state.sales.values().cloned().collect()))
    }

    pub fn supplier_debts(&self) -> OpResult<Vec<SupplierDebt>> {
        self.store()
            .read(|state| Ok(state.supplier_debts.values().cloned().collect()))
    }

    pub fn transfers(&self) -> OpResult<Vec<ManagerTransfer>> {
        self.store()
            .read(|state| Ok(state.transfers.values().cloned().collect()))
    }

    pub fn manager_sales(&self) -> OpResult<Vec<ManagerSale>> {
        self.store().read(|state| Ok(state.manager_sales.clone()))
    }

    /// A manager's remaining resellable stock across every company sale
    /// linked to them.
    pub fn manager_stock(&self, manager_id: ManagerId) -> OpResult<Quantity> {
        self.store().read(|state| {
            if !state.managers.contains_key(&manager_id) {
                return Err(OpError::NotFound);
            }
            let sales: Vec<&Sale> = state
                .sales
                .values()
                .filter(|s| s.manager_id == Some(manager_id))
                .collect();
            Ok(available_stock(sales, &state.manager_sales)?)
        })
    }

    pub fn partners(&self) -> OpResult<Vec<Partner>> {
        self.store()
            .read(|state| Ok(state.partners.values().cloned().collect()))
    }

    pub fn suppliers(&self) -> OpResult<Vec<Supplier>> {
        self.store()
            .read(|state| Ok(state.suppliers.values().cloned().collect()))
    }

    pub fn managers(&self) -> OpResult<Vec<Manager>> {
        self.store()
            .read(|state| Ok(state.managers.values().cloned().collect()))
    }

    pub fn items(&self) -> OpResult<Vec<Item>> {
        self.store()
            .read(|state| Ok(state.items.values().cloned().collect()))
    }

    /// Audit entries, oldest first.
    pub fn audit_entries(&self) -> OpResult<Vec<AuditEntry>> {
        self.audit_trail()
            .entries()
            .map_err(|err| OpError::Internal(err.to_string()))
    }
}
