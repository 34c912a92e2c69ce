//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Staff profiles and HR records are both keyed by the staff member's id, so
/// repositories can address either through this trait.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
