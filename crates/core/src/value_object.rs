//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. They are defined entirely by their
//! attribute values (packaging metadata, an occupancy assumption, an area
//! profile). Two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: `Packaging { case_size: 12, units_per_box: 6, .. }`
/// - **Entity**: `Item { id: ItemId(..), name: "..", .. }`
///
/// The trait requires `Clone + PartialEq + Debug`; value objects should be
/// cheap to copy and easy to log.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
