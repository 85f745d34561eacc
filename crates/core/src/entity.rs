//! Entity trait: objects with identity that persists through mutation.

/// Marker for domain entities. An entity is compared by its id, not by
/// its current field values; an order that splits or a loan that gets
/// repaid stays the same entity.
pub trait Entity {
    /// Strongly-typed identifier newtype.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
