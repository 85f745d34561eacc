use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timberledger_core::{DomainError, DomainResult, Entity, EntityId, Money, Quantity};
use timberledger_items::{ItemId, Unit};
use timberledger_parties::SupplierId;

use crate::container::{ContainerLoads, ContainerSpec};

/// Order identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl OrderId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }

    pub fn as_entity(&self) -> EntityId {
        self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order status pipeline. All transitions are one-way; `sold` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Loan,
    Paid,
    OnWay,
    Warehouse,
    Sold,
}

/// Result of a customs clearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomsOutcome {
    /// The whole remaining value cleared; the order is now `warehouse`.
    Cleared,
    /// Only part cleared: a new order row carries the cleared portion, the
    /// original keeps the rest and stays `on_way`.
    Split { cleared: Order },
}

/// Result of a sale against a `warehouse` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellOutcome {
    pub sale_value: Quantity,
    pub sale_price: Money,
    /// Whether the order's full remaining value was sold (status is `sold`).
    pub sold_out: bool,
}

/// Entity: one purchase transaction with a supplier.
///
/// Invariants: `value >= 0`; `total_price` tracks `value * price_per_unit`
/// except where transportation/customs costs were added on top (or a debt
/// netting adjusted it at creation). Orders are mutated in place by
/// transitions and may split, but are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    number: String,
    supplier_id: SupplierId,
    item_id: ItemId,
    unit: Unit,
    /// Remaining quantity (shrinks on splits and partial sales).
    value: Quantity,
    /// Quantity at creation; the container capacity bound.
    original_value: Quantity,
    price_per_unit: Money,
    total_price: Money,
    status: OrderStatus,
    containers: u32,
    container_loads: ContainerLoads,
    transportation_cost: Money,
    customer_fee: Money,
    order_date: DateTime<Utc>,
    /// How many child orders this order has split off (derives child numbers).
    splits: u32,
}

impl Order {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OrderId,
        number: impl Into<String>,
        supplier_id: SupplierId,
        item_id: ItemId,
        unit: Unit,
        value: Quantity,
        price_per_unit: Money,
        total_price: Money,
        company_funded: bool,
        container_specs: &[ContainerSpec],
        order_date: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let number = number.into();
        if number.trim().is_empty() {
            return Err(DomainError::validation("order number must not be empty"));
        }
        if !value.is_positive() {
            return Err(DomainError::validation("order value must be positive"));
        }
        if price_per_unit.is_negative() || total_price.is_negative() {
            return Err(DomainError::validation("order prices must be non-negative"));
        }

        let container_loads = ContainerLoads::from_specs(container_specs, value)?;
        let containers = container_loads.len() as u32;

        Ok(Self {
            id,
            number,
            supplier_id,
            item_id,
            unit,
            value,
            original_value: value,
            price_per_unit,
            total_price,
            status: if company_funded {
                OrderStatus::Loan
            } else {
                OrderStatus::Paid
            },
            containers,
            container_loads,
            transportation_cost: Money::ZERO,
            customer_fee: Money::ZERO,
            order_date,
            splits: 0,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn supplier_id(&self) -> SupplierId {
        self.supplier_id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn value(&self) -> Quantity {
        self.value
    }

    pub fn original_value(&self) -> Quantity {
        self.original_value
    }

    pub fn price_per_unit(&self) -> Money {
        self.price_per_unit
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn containers(&self) -> u32 {
        self.containers
    }

    pub fn container_loads(&self) -> &ContainerLoads {
        &self.container_loads
    }

    pub fn transportation_cost(&self) -> Money {
        self.transportation_cost
    }

    pub fn customer_fee(&self) -> Money {
        self.customer_fee
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    fn ensure_status(&self, expected: OrderStatus) -> DomainResult<()> {
        // Wrong status for a transition reads the same as "no such order in
        // that state" to callers.
        if self.status != expected {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    /// `loan` → `paid`: the loan-funded purchase is paid out.
    ///
    /// The supplied container definitions (quantity + cost each) become the
    /// order's container ledger verbatim; their summed cost becomes the new
    /// `total_price`. Returns that total cost — the operation layer records
    /// it as an order expense after its balance guard passes.
    ///
    /// The quantities must cover `value` exactly: transportation ships by
    /// container index, so any quantity left outside a container could never
    /// move past `paid`.
    pub fn pay_loan(&mut self, specs: &[ContainerSpec]) -> DomainResult<Money> {
        self.ensure_status(OrderStatus::Loan)?;
        if specs.is_empty() {
            return Err(DomainError::validation(
                "pay-loan requires at least one container",
            ));
        }

        let mut total_cost = Money::ZERO;
        let mut total_quantity = Quantity::ZERO;
        for spec in specs {
            let cost = spec.cost.ok_or_else(|| {
                DomainError::validation("every pay-loan container needs a cost")
            })?;
            if cost.is_negative() {
                return Err(DomainError::validation("container cost must be non-negative"));
            }
            total_cost = total_cost.checked_add(cost)?;
            total_quantity = total_quantity.checked_add(spec.quantity)?;
        }
        if total_quantity != self.value {
            return Err(DomainError::validation(format!(
                "containers must cover the full order value: got {total_quantity} {}, need {}",
                self.unit, self.value
            )));
        }

        self.container_loads = ContainerLoads::from_specs(specs, self.value)?;
        self.containers = self.container_loads.len() as u32;
        self.total_price = total_cost;
        self.status = OrderStatus::Paid;
        Ok(total_cost)
    }

    /// `paid` → `on_way`: a subset of containers ships.
    ///
    /// Appends one shipment record to the container ledger and adds the cost
    /// to `transportation_cost`/`total_price`. Returns the generated shipment
    /// description for the expense entry.
    pub fn pay_transportation(
        &mut self,
        cost: Money,
        container_indices: &[u32],
        quantity: Quantity,
    ) -> DomainResult<String> {
        self.ensure_status(OrderStatus::Paid)?;
        if cost.is_negative() {
            return Err(DomainError::validation(
                "transportation cost must be non-negative",
            ));
        }
        if container_indices.is_empty() {
            return Err(DomainError::validation(
                "at least one container index is required",
            ));
        }
        let selected = self.container_loads.quantity_at(container_indices)?;
        if quantity != selected {
            return Err(DomainError::validation(format!(
                "declared quantity {quantity} does not match selected containers ({selected})"
            )));
        }

        let note = format!(
            "order {} shipment: {} {} in containers {:?}",
            self.number, quantity, self.unit, container_indices
        );
        self.container_loads.append_shipment(quantity, cost, &note)?;
        self.containers = self.container_loads.len() as u32;
        self.transportation_cost = self.transportation_cost.checked_add(cost)?;
        self.total_price = self.total_price.checked_add(cost)?;
        self.status = OrderStatus::OnWay;
        Ok(note)
    }

    /// `on_way` → `warehouse`: customs clearance, possibly partial.
    ///
    /// `quantity` defaults to the whole remaining value. A partial clearance
    /// splits the order: `split_id` becomes a new `warehouse` order carrying
    /// the cleared quantity, its price prorated from this order's total plus
    /// the customs cost; this order keeps the rest and stays `on_way`.
    pub fn pay_customs(
        &mut self,
        cost: Money,
        quantity: Option<Quantity>,
        split_id: OrderId,
    ) -> DomainResult<CustomsOutcome> {
        self.ensure_status(OrderStatus::OnWay)?;
        if cost.is_negative() {
            return Err(DomainError::validation("customs fee must be non-negative"));
        }
        let quantity = quantity.unwrap_or(self.value);
        if !quantity.is_positive() {
            return Err(DomainError::validation("customs quantity must be positive"));
        }
        if quantity > self.value {
            return Err(DomainError::validation(format!(
                "customs quantity {quantity} exceeds remaining order value {}",
                self.value
            )));
        }

        if quantity == self.value {
            self.customer_fee = self.customer_fee.checked_add(cost)?;
            self.total_price = self.total_price.checked_add(cost)?;
            self.status = OrderStatus::Warehouse;
            return Ok(CustomsOutcome::Cleared);
        }

        // Partial: carve the cleared share out of the running total so the
        // two parts sum back exactly, then add the fee to the cleared side.
        let carved = self.total_price.prorate(quantity, self.value)?;
        self.splits += 1;
        let child = Order {
            id: split_id,
            number: format!("{}-{}", self.number, self.splits),
            supplier_id: self.supplier_id,
            item_id: self.item_id,
            unit: self.unit,
            value: quantity,
            original_value: quantity,
            price_per_unit: self.price_per_unit,
            total_price: carved.checked_add(cost)?,
            status: OrderStatus::Warehouse,
            containers: 0,
            container_loads: ContainerLoads::empty(),
            transportation_cost: Money::ZERO,
            customer_fee: cost,
            order_date: self.order_date,
            splits: 0,
        };

        self.value = self.value.checked_sub(quantity)?;
        self.total_price = self.total_price.checked_sub(carved)?;
        Ok(CustomsOutcome::Split { cleared: child })
    }

    /// `warehouse` → `sold` (or a partial sale that leaves the remainder
    /// sellable).
    pub fn sell(&mut self, quantity: Quantity, unit_price: Money) -> DomainResult<SellOutcome> {
        self.ensure_status(OrderStatus::Warehouse)?;
        if !quantity.is_positive() {
            return Err(DomainError::validation("sale quantity must be positive"));
        }
        if quantity > self.value {
            return Err(DomainError::validation(format!(
                "sale quantity {quantity} exceeds remaining order value {}",
                self.value
            )));
        }
        if unit_price.is_negative() {
            return Err(DomainError::validation("sale price must be non-negative"));
        }

        let sale_price = unit_price.checked_mul_quantity(quantity)?;
        let sold_out = quantity == self.value;
        if sold_out {
            self.status = OrderStatus::Sold;
        } else {
            let carved = self.total_price.prorate(quantity, self.value)?;
            self.total_price = self.total_price.checked_sub(carved)?;
            self.value = self.value.checked_sub(quantity)?;
        }

        Ok(SellOutcome {
            sale_value: quantity,
            sale_price,
            sold_out,
        })
    }

    /// Additional volume for a still-unpaid (`loan`) order, at the original
    /// unit price. Returns the cost added to the order.
    pub fn increase_value(&mut self, quantity: Quantity) -> DomainResult<Money> {
        self.ensure_status(OrderStatus::Loan)?;
        if !quantity.is_positive() {
            return Err(DomainError::validation("increase quantity must be positive"));
        }
        let added = self.price_per_unit.checked_mul_quantity(quantity)?;
        self.value = self.value.checked_add(quantity)?;
        self.original_value = self.original_value.checked_add(quantity)?;
        self.total_price = self.total_price.checked_add(added)?;
        Ok(added)
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
