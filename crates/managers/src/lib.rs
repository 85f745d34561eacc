//! Manager sub-ledger (pure domain logic).
//!
//! Managers "buy" warehouse stock from the company (their purchase is a loan
//! owed back), resell it, and move cash back to the company through
//! admin-gated transfers. No IO, no HTTP, no persistence concerns.

pub mod resale;
pub mod transfer;

pub use resale::{available_stock, remaining_for_sale, ManagerSale, ManagerSaleId};
pub use transfer::{ManagerTransfer, TransferDestination, TransferId, TransferStatus};
