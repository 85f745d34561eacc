//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; two
/// value objects with the same values are the same value. To "modify" one,
/// construct a new one. `Money`, `Quantity` and the container-load list are
/// the main implementors here.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
