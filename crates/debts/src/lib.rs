//! Supplier debt ledger (goods owed by a supplier, in units not cash).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod debt;

pub use debt::{settle_fifo, NettingMode, SupplierDebt, SupplierDebtId};
