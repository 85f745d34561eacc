//! Shared datastore and operation layer.
//!
//! The [`Store`] holds every table behind one lock and applies mutations as
//! serialized, all-or-nothing transactions. [`TradeOps`] wires the domain
//! crates together: one method per externally invokable operation, each run
//! inside a single transaction, with an audit entry appended after commit.

pub mod error;
pub mod ops;
pub mod queries;
pub mod store;


pub use error::{OpError, OpResult};
pub use ops::{
    CreateLoanRequest, CreateOrderRequest, NettingRequest, ResaleRequest, SellRequest, TradeOps,
};
pub use store::{State, Store};
