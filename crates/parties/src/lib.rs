//! Parties domain module (partners, suppliers, managers).
//!
//! This crate contains the counterparty entities the ledger transacts with,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod manager;
pub mod partner;
pub mod supplier;

pub use manager::{Manager, ManagerId};
pub use partner::{LoanSource, Partner, PartnerId};
pub use supplier::{Supplier, SupplierId};
