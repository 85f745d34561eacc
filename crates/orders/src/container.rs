use serde::{Deserialize, Serialize};

use timberledger_core::{DomainError, DomainResult, Money, Quantity, ValueObject};

/// Shipment status carried on a container record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    OnWay,
}

/// One container entry in an order's container ledger.
///
/// Records without a `status` are physical loads (goods put into a
/// container); records with a status describe a shipment of already-loaded
/// goods. Only loads count against the order's capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// 1..N, monotonic per order; assigned on append, never reused.
    pub index: u32,
    pub quantity: Quantity,
    pub cost: Option<Money>,
    pub note: Option<String>,
    pub status: Option<ShipmentStatus>,
}

/// Caller-supplied container definition (quantity + optional cost/note).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub quantity: Quantity,
    pub cost: Option<Money>,
    pub note: Option<String>,
}

/// The order's container ledger: an append-only, explicitly versioned list.
///
/// Invariants: indices are 1..N monotonic; the summed quantity of load
/// records never exceeds the capacity the ledger was created with; existing
/// entries are never removed or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerLoads {
    schema_version: u32,
    records: Vec<ContainerRecord>,
}

impl ContainerLoads {
    pub const SCHEMA_VERSION: u32 = 1;

    pub fn empty() -> Self {
        Self {
            schema_version: Self::SCHEMA_VERSION,
            records: Vec::new(),
        }
    }

    /// Build the initial ledger from caller-supplied container definitions.
    ///
    /// Every definition is a load; their quantities must be positive and sum
    /// to at most `capacity`.
    pub fn from_specs(specs: &[ContainerSpec], capacity: Quantity) -> DomainResult<Self> {
        let mut loads = Self::empty();
        for spec in specs {
            loads.append_load(spec.clone(), capacity)?;
        }
        Ok(loads)
    }

    pub fn records(&self) -> &[ContainerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// Summed quantity of load records (shipment records describe movement
    /// of goods already counted by a load, so they are excluded).
    pub fn loaded_quantity(&self) -> Quantity {
        self.records
            .iter()
            .filter(|r| r.status.is_none())
            .fold(Quantity::ZERO, |acc, r| {
                Quantity::from_units(acc.units() + r.quantity.units())
            })
    }

    /// Append a physical load, enforcing the capacity invariant.
    pub fn append_load(&mut self, spec: ContainerSpec, capacity: Quantity) -> DomainResult<u32> {
        if !spec.quantity.is_positive() {
            return Err(DomainError::validation(
                "container quantity must be positive",
            ));
        }
        let loaded = self.loaded_quantity().checked_add(spec.quantity)?;
        if loaded > capacity {
            return Err(DomainError::invariant(format!(
                "container quantities ({loaded}) exceed order value ({capacity})"
            )));
        }
        Ok(self.push(spec, None))
    }

    /// Append a shipment record (goods leaving for customs), marked `on_way`.
    pub fn append_shipment(
        &mut self,
        quantity: Quantity,
        cost: Money,
        note: impl Into<String>,
    ) -> DomainResult<u32> {
        if !quantity.is_positive() {
            return Err(DomainError::validation(
                "shipment quantity must be positive",
            ));
        }
        let spec = ContainerSpec {
            quantity,
            cost: Some(cost),
            note: Some(note.into()),
        };
        Ok(self.push(spec, Some(ShipmentStatus::OnWay)))
    }

    /// Quantity held by the load records at `indices`.
    ///
    /// Fails if any index is unknown or refers to a shipment record.
    pub fn quantity_at(&self, indices: &[u32]) -> DomainResult<Quantity> {
        let mut total = Quantity::ZERO;
        for idx in indices {
            let record = self
                .records
                .iter()
                .find(|r| r.index == *idx && r.status.is_none())
                .ok_or_else(|| {
                    DomainError::validation(format!("no loaded container with index {idx}"))
                })?;
            total = total.checked_add(record.quantity)?;
        }
        Ok(total)
    }

    fn push(&mut self, spec: ContainerSpec, status: Option<ShipmentStatus>) -> u32 {
        let index = (self.records.len() as u32) + 1;
        self.records.push(ContainerRecord {
            index,
            quantity: spec.quantity,
            cost: spec.cost,
            note: spec.note,
            status,
        });
        index
    }
}

impl ValueObject for ContainerLoads {}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(quantity: i64, cost: Option<i64>) -> ContainerSpec {
        ContainerSpec {
            quantity: Quantity::from_units(quantity),
            cost: cost.map(Money::from_minor),
            note: None,
        }
    }

    #[test]
    fn indices_are_monotonic_from_one() {
        let loads = ContainerLoads::from_specs(
            &[spec(10, None), spec(20, None), spec(30, None)],
            Quantity::from_units(100),
        )
        .unwrap();
        let indices: Vec<u32> = loads.records().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn capacity_is_enforced_on_loads() {
        let err = ContainerLoads::from_specs(
            &[spec(60, None), spec(50, None)],
            Quantity::from_units(100),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn shipments_do_not_count_against_capacity() {
        let mut loads =
            ContainerLoads::from_specs(&[spec(100, None)], Quantity::from_units(100)).unwrap();
        let idx = loads
            .append_shipment(
                Quantity::from_units(100),
                Money::from_minor(40_000),
                "container 1 shipped",
            )
            .unwrap();
        assert_eq!(idx, 2);
        assert_eq!(loads.loaded_quantity(), Quantity::from_units(100));
    }

    #[test]
    fn quantity_at_rejects_shipment_indices() {
        let mut loads =
            ContainerLoads::from_specs(&[spec(40, None)], Quantity::from_units(100)).unwrap();
        loads
            .append_shipment(Quantity::from_units(40), Money::from_minor(1), "s")
            .unwrap();

        assert_eq!(
            loads.quantity_at(&[1]).unwrap(),
            Quantity::from_units(40)
        );
        assert!(loads.quantity_at(&[2]).is_err());
        assert!(loads.quantity_at(&[99]).is_err());
    }

    #[test]
    fn schema_version_travels_with_the_value() {
        let loads = ContainerLoads::empty();
        assert_eq!(loads.schema_version(), ContainerLoads::SCHEMA_VERSION);
    }
}
