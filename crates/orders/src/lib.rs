//! Order state machine + container ledger (pure domain logic).
//!
//! An order flows `loan`/`paid` → `on_way` → `warehouse` → `sold`; customs
//! clearance and sale may be partial, splitting the order. No IO, no HTTP,
//! no persistence concerns — transitions validate guards, mutate the order,
//! and return the cash effects for the operation layer to persist.

pub mod container;
pub mod order;
pub mod sale;

pub use container::{ContainerLoads, ContainerRecord, ContainerSpec, ShipmentStatus};
pub use order::{CustomsOutcome, Order, OrderId, OrderStatus, SellOutcome};
pub use sale::{Sale, SaleId};
