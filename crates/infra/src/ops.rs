//! The operation layer: one method per externally invokable operation.
//!
//! Every mutating method runs inside a single [`Store::transact`] call, so a
//! failed guard anywhere rolls the whole mutation back. Audit entries are
//! appended after the commit; an append failure is logged and swallowed,
//! never undoing the business mutation it describes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use timberledger_audit::{AuditAction, AuditEntry, AuditTrail};
use timberledger_core::{ActorId, EntityId, Money, Quantity};
use timberledger_debts::{settle_fifo, NettingMode, SupplierDebt, SupplierDebtId};
use timberledger_items::{Item, ItemId, Unit};
use timberledger_ledger::{ensure_funds, settle_loans_fifo, Expense, ExpenseId, ExpenseType, Loan, LoanId};
use timberledger_managers::{
    remaining_for_sale, ManagerSale, ManagerSaleId, ManagerTransfer, TransferDestination,
    TransferId,
};
use timberledger_orders::{ContainerSpec, CustomsOutcome, Order, OrderId, Sale, SaleId};
use timberledger_parties::{
    LoanSource, Manager, ManagerId, Partner, PartnerId, Supplier, SupplierId,
};

use crate::error::{OpError, OpResult};
use crate::store::{State, Store};

/// Debt-netting directive attached to an order creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NettingRequest {
    pub mode: NettingMode,
    pub quantity: Quantity,
}

/// Inputs for the order state machine's entry operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub supplier_id: SupplierId,
    pub item_id: ItemId,
    pub number: String,
    pub order_date: DateTime<Utc>,
    pub quantity: Quantity,
    pub price_per_unit: Money,
    /// Forces `loan` status; the purchase is funded by a loan instead of
    /// consuming cash immediately.
    #[serde(default)]
    pub company_funded: bool,
    /// Optional multi-container split known at creation time.
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
    /// Quantity the supplier has not physically delivered yet; becomes a
    /// supplier debt.
    #[serde(default)]
    pub unloaded: Option<Quantity>,
    #[serde(default)]
    pub netting: Option<NettingRequest>,
}

/// Inputs for selling warehouse stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellRequest {
    pub order_id: OrderId,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub buyer: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub manager_id: Option<ManagerId>,
}

/// Inputs for creating a loan directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoanRequest {
    pub source: LoanSource,
    pub amount: Money,
    #[serde(default)]
    pub loan_date: Option<DateTime<Utc>>,
    pub description: String,
}

/// Inputs for a manager's own resale of purchased stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResaleRequest {
    pub manager_id: ManagerId,
    pub sale_id: SaleId,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub buyer: String,
    pub date: DateTime<Utc>,
}

/// All trade operations, each one transaction against the shared [`Store`].
#[derive(Clone)]
pub struct TradeOps {
    store: Arc<Store>,
    audit: Arc<dyn AuditTrail>,
}

impl TradeOps {
    pub fn new(store: Arc<Store>, audit: Arc<dyn AuditTrail>) -> Self {
        Self { store, audit }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn audit_trail(&self) -> &Arc<dyn AuditTrail> {
        &self.audit
    }

    /// Best-effort post-commit audit append.
    fn record(
        &self,
        action: AuditAction,
        entity_ref: EntityId,
        actor: Option<ActorId>,
        details: serde_json::Value,
    ) {
        let entry = AuditEntry::new(action, entity_ref, actor, Utc::now(), details);
        if let Err(err) = self.audit.append(entry) {
            warn!(action = action.name(), error = %err, "audit append failed after commit");
        }
    }

    // ---- order state machine ----

    /// Entry operation: creates an order in `loan` or `paid` status.
    ///
    /// Applies the optional debt-netting directive first (FIFO over the
    /// supplier/item pair's outstanding debts), then funds the purchase: a
    /// company-funded order books a funding loan, any other order passes the
    /// balance guard and books an order expense. An undelivered remainder
    /// becomes a supplier debt.
    pub fn create_order(&self, req: CreateOrderRequest) -> OpResult<Order> {
        let order_id = OrderId::new(EntityId::new());
        let (order, netted, debt_id) = self.store.transact(|state| {
            let item = state.items.get(&req.item_id).ok_or(OpError::NotFound)?;
            let unit = item.unit;
            if !state.suppliers.contains_key(&req.supplier_id) {
                return Err(OpError::NotFound);
            }
            if state.orders.values().any(|o| o.number() == req.number) {
                return Err(OpError::Conflict(format!(
                    "order number {} already exists",
                    req.number
                )));
            }

            let mut quantity = req.quantity;
            let mut total_price = req.price_per_unit.checked_mul_quantity(req.quantity)?;

            let mut netted = Quantity::ZERO;
            if let Some(netting) = req.netting {
                let outstanding = state
                    .supplier_debts
                    .values_mut()
                    .filter(|d| d.matches(req.supplier_id, req.item_id) && !d.is_settled);
                netted = settle_fifo(outstanding, netting.quantity, Utc::now())?;
                match netting.mode {
                    NettingMode::Subtract => {
                        let forgiven = req.price_per_unit.checked_mul_quantity(netted)?;
                        total_price = total_price.checked_sub(forgiven)?;
                    }
                    NettingMode::AddToOrder => {
                        quantity = quantity.checked_add(netted)?;
                    }
                }
            }

            let order = Order::new(
                order_id,
                &req.number,
                req.supplier_id,
                req.item_id,
                unit,
                quantity,
                req.price_per_unit,
                total_price,
                req.company_funded,
                &req.containers,
                req.order_date,
            )?;

            if req.company_funded {
                let loan = Loan::new(
                    LoanId::new(EntityId::new()),
                    LoanSource::Administrator,
                    order.total_price(),
                    Some(order_id.as_entity()),
                    Some(req.order_date),
                    format!("funding for order {}", order.number()),
                )?;
                state.loans.insert(loan.id, loan);
            } else {
                let available = state.balance()?;
                ensure_funds(order.total_price(), available)?;
                state.expenses.push(Expense::new(
                    ExpenseId::new(EntityId::new()),
                    order.total_price(),
                    format!("purchase of order {}", order.number()),
                    ExpenseType::Order,
                    Some(order_id.as_entity()),
                    req.order_date,
                ));
            }

            let mut debt_id = None;
            if let Some(unloaded) = req.unloaded {
                if unloaded.is_positive() {
                    let debt = SupplierDebt::new(
                        SupplierDebtId::new(EntityId::new()),
                        req.supplier_id,
                        req.item_id,
                        order_id.as_entity(),
                        unloaded,
                    )?;
                    debt_id = Some(debt.id);
                    state.supplier_debts.insert(debt.id, debt);
                }
            }

            state.orders.insert(order_id, order.clone());
            Ok((order, netted, debt_id))
        })?;

        info!(order = %order_id, number = order.number(), status = ?order.status(), "order created");
        self.record(
            AuditAction::OrderCreated,
            order_id.as_entity(),
            None,
            json!({
                "number": order.number(),
                "quantity": order.value(),
                "total_price": order.total_price(),
                "status": order.status(),
            }),
        );
        if netted.is_positive() {
            self.record(
                AuditAction::SupplierDebtSettled,
                order_id.as_entity(),
                None,
                json!({ "netted": netted }),
            );
        }
        if let Some(debt_id) = debt_id {
            self.record(
                AuditAction::SupplierDebtCreated,
                debt_id.0,
                None,
                json!({ "order": order_id }),
            );
        }
        Ok(order)
    }

    /// `loan` → `paid`: pays out the loan-funded purchase.
    ///
    /// The balance guard deliberately excludes the order's own funding loan;
    /// that loan is the money being paid off, not spendable cash.
    pub fn pay_loan(&self, order_id: OrderId, containers: Vec<ContainerSpec>) -> OpResult<Order> {
        let order = self.store.transact(|state| {
            let available = state.balance_excluding_loan_for(order_id.as_entity())?;
            let order = state.orders.get_mut(&order_id).ok_or(OpError::NotFound)?;
            let cost = order.pay_loan(&containers)?;
            ensure_funds(cost, available)?;
            let snapshot = order.clone();
            state.expenses.push(Expense::new(
                ExpenseId::new(EntityId::new()),
                cost,
                format!("payment for order {}", snapshot.number()),
                ExpenseType::Order,
                Some(order_id.as_entity()),
                Utc::now(),
            ));
            Ok(snapshot)
        })?;

        info!(order = %order_id, total = %order.total_price(), "order loan paid");
        self.record(
            AuditAction::OrderLoanPaid,
            order_id.as_entity(),
            None,
            json!({ "total_price": order.total_price(), "containers": order.containers() }),
        );
        Ok(order)
    }

    /// `paid` → `on_way`: ships a subset of containers.
    pub fn pay_transportation(
        &self,
        order_id: OrderId,
        cost: Money,
        container_indices: Vec<u32>,
        quantity: Quantity,
    ) -> OpResult<Order> {
        let order = self.store.transact(|state| {
            let available = state.balance()?;
            ensure_funds(cost, available)?;
            let order = state.orders.get_mut(&order_id).ok_or(OpError::NotFound)?;
            let note = order.pay_transportation(cost, &container_indices, quantity)?;
            let snapshot = order.clone();
            state.expenses.push(Expense::new(
                ExpenseId::new(EntityId::new()),
                cost,
                note,
                ExpenseType::Transportation,
                Some(order_id.as_entity()),
                Utc::now(),
            ));
            Ok(snapshot)
        })?;

        info!(order = %order_id, %cost, "transportation paid");
        self.record(
            AuditAction::OrderTransportationPaid,
            order_id.as_entity(),
            None,
            json!({ "cost": cost, "quantity": quantity, "containers": container_indices }),
        );
        Ok(order)
    }

    /// `on_way` → `warehouse`: customs clearance; a partial quantity splits
    /// the order. Returns the updated order and the split-off child, if any.
    pub fn pay_customs(
        &self,
        order_id: OrderId,
        cost: Money,
        quantity: Option<Quantity>,
    ) -> OpResult<(Order, Option<Order>)> {
        let split_id = OrderId::new(EntityId::new());
        let (order, child) = self.store.transact(|state| {
            let available = state.balance()?;
            ensure_funds(cost, available)?;
            let order = state.orders.get_mut(&order_id).ok_or(OpError::NotFound)?;
            let outcome = order.pay_customs(cost, quantity, split_id)?;
            let snapshot = order.clone();
            state.expenses.push(Expense::new(
                ExpenseId::new(EntityId::new()),
                cost,
                format!("customs fee for order {}", snapshot.number()),
                ExpenseType::Customs,
                Some(order_id.as_entity()),
                Utc::now(),
            ));
            let child = match outcome {
                CustomsOutcome::Cleared => None,
                CustomsOutcome::Split { cleared } => {
                    state.orders.insert(cleared.id_typed(), cleared.clone());
                    Some(cleared)
                }
            };
            Ok((snapshot, child))
        })?;

        info!(order = %order_id, %cost, split = child.is_some(), "customs paid");
        self.record(
            AuditAction::OrderCustomsPaid,
            order_id.as_entity(),
            None,
            json!({ "cost": cost, "remaining": order.value(), "status": order.status() }),
        );
        if let Some(child) = &child {
            self.record(
                AuditAction::OrderSplit,
                child.id_typed().as_entity(),
                None,
                json!({
                    "parent": order_id,
                    "number": child.number(),
                    "quantity": child.value(),
                    "total_price": child.total_price(),
                }),
            );
        }
        Ok((order, child))
    }

    /// `warehouse` → `sold` (or a partial sale leaving the remainder
    /// sellable).
    ///
    /// The proceeds are parked as an unpaid loan owed to the company: by the
    /// manager's partner identity when the sale is linked to a manager, by
    /// the administrator otherwise. A manager-linked sale carries the
    /// manager's display name as the buyer.
    pub fn sell(&self, req: SellRequest) -> OpResult<Sale> {
        let sale_id = SaleId::new(EntityId::new());
        let sale = self.store.transact(|state| {
            let (buyer, source) = match req.manager_id {
                Some(manager_id) => {
                    let manager =
                        state.managers.get(&manager_id).ok_or(OpError::NotFound)?;
                    (manager.name.clone(), manager.loan_source())
                }
                None => (req.buyer.clone(), LoanSource::Administrator),
            };
            let order = state.orders.get_mut(&req.order_id).ok_or(OpError::NotFound)?;
            let outcome = order.sell(req.quantity, req.unit_price)?;
            let number = order.number().to_string();

            let sale = Sale::new(
                sale_id,
                req.order_id,
                buyer,
                outcome.sale_value,
                outcome.sale_price,
                req.date,
                req.manager_id,
            );
            state.sales.insert(sale_id, sale.clone());

            let mut loan = Loan::new(
                LoanId::new(EntityId::new()),
                source,
                outcome.sale_price,
                None,
                Some(req.date),
                format!("proceeds of sale on order {number}"),
            )?;
            loan.manager_ref = req.manager_id;
            state.loans.insert(loan.id, loan);
            Ok(sale)
        })?;

        info!(order = %req.order_id, sale = %sale_id, price = %sale.sale_price, "stock sold");
        self.record(
            AuditAction::OrderSold,
            req.order_id.as_entity(),
            None,
            json!({
                "sale": sale_id,
                "buyer": sale.buyer,
                "quantity": sale.sale_value,
                "price": sale.sale_price,
            }),
        );
        Ok(sale)
    }

    /// Additional volume for a still-unpaid (`loan`) order.
    ///
    /// The added cost flows into the order's funding loan and is gated by
    /// the same balance check as any other spend.
    pub fn increase_order_value(&self, order_id: OrderId, quantity: Quantity) -> OpResult<Order> {
        let (order, added) = self.store.transact(|state| {
            let available = state.balance_excluding_loan_for(order_id.as_entity())?;
            let order = state.orders.get_mut(&order_id).ok_or(OpError::NotFound)?;
            let added = order.increase_value(quantity)?;
            ensure_funds(added, available)?;
            let snapshot = order.clone();
            let funding = state
                .loans
                .values_mut()
                .find(|l| l.order_ref == Some(order_id.as_entity()) && !l.is_paid)
                .ok_or_else(|| {
                    OpError::Internal("loan-status order has no funding loan".to_string())
                })?;
            funding.increase(added)?;
            Ok((snapshot, added))
        })?;

        info!(order = %order_id, %added, "order value increased");
        self.record(
            AuditAction::OrderValueIncreased,
            order_id.as_entity(),
            None,
            json!({ "quantity": quantity, "added": added, "value": order.value() }),
        );
        Ok(order)
    }

    // ---- ledger ----

    pub fn create_loan(&self, req: CreateLoanRequest) -> OpResult<Loan> {
        let loan = self.store.transact(|state| {
            if let LoanSource::Partner(partner_id) = req.source {
                if !state.partners.contains_key(&partner_id) {
                    return Err(OpError::NotFound);
                }
            }
            let loan = Loan::new(
                LoanId::new(EntityId::new()),
                req.source,
                req.amount,
                None,
                req.loan_date,
                req.description.clone(),
            )?;
            state.loans.insert(loan.id, loan.clone());
            Ok(loan)
        })?;

        info!(loan = %loan.id, amount = %loan.amount, "loan created");
        self.record(
            AuditAction::LoanCreated,
            loan.id.0,
            None,
            json!({ "source": loan.source, "amount": loan.amount }),
        );
        Ok(loan)
    }

    /// Partial or full repayment against one loan. The audit entry is the
    /// payment-history record; nothing but the loan itself changes.
    pub fn repay_loan(&self, loan_id: LoanId, amount: Money) -> OpResult<Loan> {
        let loan = self.store.transact(|state| {
            let loan = state.loans.get_mut(&loan_id).ok_or(OpError::NotFound)?;
            loan.repay(amount)?;
            Ok(loan.clone())
        })?;

        info!(loan = %loan_id, %amount, paid = loan.is_paid, "loan repaid");
        self.record(
            AuditAction::LoanRepaid,
            loan_id.0,
            None,
            json!({ "amount": amount, "outstanding": loan.amount, "is_paid": loan.is_paid }),
        );
        Ok(loan)
    }

    // ---- manager sub-ledger ----

    /// A manager resells previously purchased stock; the proceeds become a
    /// new loan they owe the company.
    pub fn manager_resale(&self, req: ResaleRequest) -> OpResult<ManagerSale> {
        let resale_id = ManagerSaleId::new(EntityId::new());
        let resale = self.store.transact(|state| {
            let manager = state.managers.get(&req.manager_id).ok_or(OpError::NotFound)?;
            let source = manager.loan_source();
            let sale = state.sales.get(&req.sale_id).ok_or(OpError::NotFound)?;
            if sale.manager_id != Some(req.manager_id) {
                return Err(OpError::NotFound);
            }
            if !req.quantity.is_positive() {
                return Err(OpError::Validation(
                    "resale quantity must be positive".to_string(),
                ));
            }
            if req.unit_price.is_negative() {
                return Err(OpError::Validation(
                    "resale price must be non-negative".to_string(),
                ));
            }
            let remaining = remaining_for_sale(sale, state.manager_sales.iter())?;
            if req.quantity > remaining {
                return Err(OpError::Validation(format!(
                    "resale quantity {} exceeds remaining stock {remaining}",
                    req.quantity
                )));
            }

            let price = req.unit_price.checked_mul_quantity(req.quantity)?;
            let resale = ManagerSale::new(
                resale_id,
                req.manager_id,
                req.sale_id,
                req.quantity,
                price,
                req.buyer.clone(),
                req.date,
            );
            state.manager_sales.push(resale.clone());

            let loan = Loan::new(
                LoanId::new(EntityId::new()),
                source,
                price,
                None,
                Some(req.date),
                format!("manager resale against sale {}", req.sale_id),
            )?
            .owed_by(req.manager_id);
            state.loans.insert(loan.id, loan);
            Ok(resale)
        })?;

        info!(manager = %req.manager_id, resale = %resale_id, price = %resale.sale_price, "manager resale");
        self.record(
            AuditAction::ManagerResale,
            resale_id.0,
            None,
            json!({
                "manager": req.manager_id,
                "sale": req.sale_id,
                "quantity": resale.quantity,
                "price": resale.sale_price,
            }),
        );
        Ok(resale)
    }

    /// A manager requests moving cash back to the company or to a partner;
    /// starts `pending`.
    pub fn request_transfer(
        &self,
        manager_id: ManagerId,
        destination: TransferDestination,
        amount: Money,
        description: String,
    ) -> OpResult<ManagerTransfer> {
        let transfer_id = TransferId::new(EntityId::new());
        let transfer = self.store.transact(|state| {
            if !state.managers.contains_key(&manager_id) {
                return Err(OpError::NotFound);
            }
            if let TransferDestination::Partner(partner_id) = destination {
                if !state.partners.contains_key(&partner_id) {
                    return Err(OpError::NotFound);
                }
            }
            let transfer =
                ManagerTransfer::request(transfer_id, manager_id, destination, amount, description.clone())?;
            state.transfers.insert(transfer_id, transfer.clone());
            Ok(transfer)
        })?;

        info!(transfer = %transfer_id, manager = %manager_id, %amount, "transfer requested");
        self.record(
            AuditAction::TransferRequested,
            transfer_id.0,
            None,
            json!({ "manager": manager_id, "destination": transfer.destination, "amount": amount }),
        );
        Ok(transfer)
    }

    /// Admin decision on a pending transfer. Approval settles the manager's
    /// unpaid loans oldest-first with the transferred amount; rejection has
    /// no ledger effect. Both are terminal.
    pub fn decide_transfer(
        &self,
        transfer_id: TransferId,
        approve: bool,
        approver: ActorId,
    ) -> OpResult<ManagerTransfer> {
        let transfer = self.store.transact(|state| {
            let now = Utc::now();
            let transfer = state.transfers.get_mut(&transfer_id).ok_or(OpError::NotFound)?;
            if approve {
                transfer.approve(approver, now)?;
            } else {
                transfer.reject(approver, now)?;
            }
            let snapshot = transfer.clone();
            if approve {
                settle_manager_loans(state, snapshot.manager_id, snapshot.amount, now)?;
            }
            Ok(snapshot)
        })?;

        let action = if approve {
            AuditAction::TransferApproved
        } else {
            AuditAction::TransferRejected
        };
        info!(transfer = %transfer_id, approve, "transfer decided");
        self.record(
            action,
            transfer_id.0,
            Some(approver),
            json!({ "manager": transfer.manager_id, "amount": transfer.amount }),
        );
        Ok(transfer)
    }

    /// Admin-initiated take: records an already-approved transfer, settles
    /// the manager's unpaid loans oldest-first, and books any remainder as
    /// cash owed by the administrator (it flows into the general balance).
    pub fn take_from_manager(
        &self,
        manager_id: ManagerId,
        amount: Money,
        description: String,
        approver: ActorId,
    ) -> OpResult<ManagerTransfer> {
        let transfer_id = TransferId::new(EntityId::new());
        let (transfer, remainder) = self.store.transact(|state| {
            if !state.managers.contains_key(&manager_id) {
                return Err(OpError::NotFound);
            }
            let now = Utc::now();
            let transfer = ManagerTransfer::taken(
                transfer_id,
                manager_id,
                amount,
                description.clone(),
                approver,
                now,
            )?;
            state.transfers.insert(transfer_id, transfer.clone());
            let remainder = settle_manager_loans(state, manager_id, amount, now)?;
            Ok((transfer, remainder))
        })?;

        info!(manager = %manager_id, %amount, %remainder, "money taken from manager");
        self.record(
            AuditAction::MoneyTakenFromManager,
            transfer_id.0,
            Some(approver),
            json!({ "manager": manager_id, "amount": amount, "remainder": remainder }),
        );
        Ok(transfer)
    }

    // ---- registries (plumbing so the core can be exercised) ----

    pub fn create_partner(&self, name: String) -> OpResult<Partner> {
        self.store.transact(|state| {
            ensure_name(&name)?;
            let partner = Partner::new(PartnerId::new(EntityId::new()), name.clone());
            state.partners.insert(partner.id, partner.clone());
            Ok(partner)
        })
    }

    pub fn create_supplier(&self, name: String) -> OpResult<Supplier> {
        self.store.transact(|state| {
            ensure_name(&name)?;
            let supplier = Supplier::new(SupplierId::new(EntityId::new()), name.clone());
            state.suppliers.insert(supplier.id, supplier.clone());
            Ok(supplier)
        })
    }

    pub fn create_manager(
        &self,
        name: String,
        partner_id: Option<PartnerId>,
    ) -> OpResult<Manager> {
        self.store.transact(|state| {
            ensure_name(&name)?;
            if let Some(partner_id) = partner_id {
                if !state.partners.contains_key(&partner_id) {
                    return Err(OpError::NotFound);
                }
            }
            let manager = Manager::new(ManagerId::new(EntityId::new()), name.clone(), partner_id);
            state.managers.insert(manager.id, manager.clone());
            Ok(manager)
        })
    }

    pub fn create_item(&self, name: String, unit: Unit) -> OpResult<Item> {
        self.store.transact(|state| {
            ensure_name(&name)?;
            let item = Item::new(ItemId::new(EntityId::new()), name.clone(), unit);
            state.items.insert(item.id, item.clone());
            Ok(item)
        })
    }
}

fn ensure_name(name: &str) -> OpResult<()> {
    if name.trim().is_empty() {
        return Err(OpError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

/// Walk the unpaid loans this manager owes (their `manager_ref`)
/// oldest-first, absorbing `amount` into them; any money left over becomes a
/// fresh administrator-sourced loan.
fn settle_manager_loans(
    state: &mut State,
    manager_id: ManagerId,
    amount: Money,
    now: DateTime<Utc>,
) -> OpResult<Money> {
    if !state.managers.contains_key(&manager_id) {
        return Err(OpError::NotFound);
    }

    let remainder = settle_loans_fifo(
        state
            .loans
            .values_mut()
            .filter(|l| l.manager_ref == Some(manager_id) && !l.is_paid),
        amount,
    )?;

    if !remainder.is_zero() {
        let loan = Loan::new(
            LoanId::new(EntityId::new()),
            LoanSource::Administrator,
            remainder,
            None,
            Some(now),
            format!("unmatched remainder taken from manager {manager_id}"),
        )?;
        state.loans.insert(loan.id, loan);
    }
    Ok(remainder)
}
