//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Locations and items are both entities: two rows with equal attributes are still
/// distinct if their identifiers differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
