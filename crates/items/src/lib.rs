//! Traded item catalog (pure domain, no IO).

pub mod item;

pub use item::{Item, ItemId, Unit};
