//! Value object trait: equality by value, not identity.
//!
//! Value objects (concepts, in the network model) have **no identity** and no
//! registry of their own. They are embedded in the resources that carry them,
//! e.g. a postal `Address` inside a participant.

/// Marker trait for value objects.
///
/// Two value objects with the same attribute values are the same value. To
/// "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
