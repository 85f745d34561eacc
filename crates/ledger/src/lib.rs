//! Shared cash ledger (loans, expenses, derived balance).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. The
//! ledger tables are owned collectively — every component that spends or
//! receives cash appends here inside its own transaction.

pub mod balance;
pub mod expense;
pub mod loan;
pub mod settlement;

pub use balance::{balance, ensure_funds};
pub use expense::{Expense, ExpenseId, ExpenseType};
pub use loan::{Loan, LoanId};
pub use settlement::settle_loans_fifo;
