//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Record identifiers are totally ordered so that stores and reports can
/// iterate records in a stable order (id ascending is the engine's tie-break).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
