//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To
/// "modify" one, build a new one. Constructors are where validation lives, so
/// once a value object exists it is known to be well-formed.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct EstimatedCost(f64);
///
/// impl ValueObject for EstimatedCost {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
