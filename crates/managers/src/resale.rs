use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timberledger_core::{DomainResult, Entity, EntityId, Money, Quantity};
use timberledger_orders::{Sale, SaleId};
use timberledger_parties::ManagerId;

/// Manager sale identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ManagerSaleId(pub EntityId);

impl ManagerSaleId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ManagerSaleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Entity: a manager's own resale against a company sale. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSale {
    pub id: ManagerSaleId,
    pub manager_id: ManagerId,
    /// The company sale this resale draws stock from.
    pub sale_id: SaleId,
    pub quantity: Quantity,
    /// Total resale proceeds (quantity × the manager's unit price).
    pub sale_price: Money,
    pub buyer: String,
    pub date: DateTime<Utc>,
}

impl ManagerSale {
    pub fn new(
        id: ManagerSaleId,
        manager_id: ManagerId,
        sale_id: SaleId,
        quantity: Quantity,
        sale_price: Money,
        buyer: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            manager_id,
            sale_id,
            quantity,
            sale_price,
            buyer: buyer.into(),
            date,
        }
    }
}

impl Entity for ManagerSale {
    type Id = ManagerSaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Stock still resellable from one company sale:
/// `sale.sale_value − Σ(quantities of this manager's resales against it)`.
pub fn remaining_for_sale<'a>(
    sale: &Sale,
    resales: impl IntoIterator<Item = &'a ManagerSale>,
) -> DomainResult<Quantity> {
    let mut remaining = sale.sale_value;
    for resale in resales {
        if resale.sale_id == sale.id {
            remaining = remaining.checked_sub(resale.quantity)?;
        }
    }
    Ok(remaining)
}

/// A manager's total resellable stock across all company sales linked to
/// them. `sales` must already be filtered to this manager's purchases.
pub fn available_stock<'a>(
    sales: impl IntoIterator<Item = &'a Sale>,
    resales: impl IntoIterator<Item = &'a ManagerSale> + Copy,
) -> DomainResult<Quantity> {
    let mut total = Quantity::ZERO;
    for sale in sales {
        total = total.checked_add(remaining_for_sale(sale, resales)?)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use timberledger_orders::OrderId;

    fn sale(value: i64, manager: ManagerId) -> Sale {
        Sale::new(
            SaleId::new(EntityId::new()),
            OrderId::new(EntityId::new()),
            "Oleg",
            Quantity::from_units(value),
            Money::from_minor(value * 100),
            Utc::now(),
            Some(manager),
        )
    }

    fn resale(sale_id: SaleId, manager: ManagerId, quantity: i64) -> ManagerSale {
        ManagerSale::new(
            ManagerSaleId::new(EntityId::new()),
            manager,
            sale_id,
            Quantity::from_units(quantity),
            Money::from_minor(quantity * 150),
            "retail buyer",
            Utc::now(),
        )
    }

    #[test]
    fn remaining_stock_subtracts_own_resales() {
        let manager = ManagerId::new(EntityId::new());
        let s = sale(100, manager);
        let resales = vec![resale(s.id, manager, 30), resale(s.id, manager, 20)];

        let remaining = remaining_for_sale(&s, &resales).unwrap();
        assert_eq!(remaining, Quantity::from_units(50));
    }

    #[test]
    fn resales_against_other_sales_do_not_count() {
        let manager = ManagerId::new(EntityId::new());
        let s = sale(100, manager);
        let other = resale(SaleId::new(EntityId::new()), manager, 40);

        let remaining = remaining_for_sale(&s, &[other]).unwrap();
        assert_eq!(remaining, Quantity::from_units(100));
    }

    #[test]
    fn available_stock_sums_across_sales() {
        let manager = ManagerId::new(EntityId::new());
        let a = sale(100, manager);
        let b = sale(50, manager);
        let resales = vec![resale(a.id, manager, 90)];

        let total = available_stock(vec![&a, &b], &resales).unwrap();
        assert_eq!(total, Quantity::from_units(60));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: remaining stock is exactly the sale value minus the
            /// sum of resales drawn against it, regardless of how the draws
            /// are sliced.
            #[test]
            fn remaining_stock_conserves_units(
                value in 1i64..10_000,
                draws in prop::collection::vec(1i64..100, 0..20),
            ) {
                let manager = ManagerId::new(EntityId::new());
                let s = sale(value, manager);

                let mut resales = Vec::new();
                let mut drawn = 0i64;
                for d in draws {
                    if drawn + d > value {
                        break;
                    }
                    drawn += d;
                    resales.push(resale(s.id, manager, d));
                }

                let remaining = remaining_for_sale(&s, &resales).unwrap();
                prop_assert_eq!(remaining.units(), value - drawn);
                prop_assert!(remaining.units() >= 0);
            }
        }
    }
}
