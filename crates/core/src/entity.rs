//! Entity trait: identity that survives stock changes.

/// A record with a store-assigned identity.
///
/// Two entities with the same id are the same record, even when other fields
/// (such as quantity) differ.
pub trait Entity {
    /// Strongly-typed entity identifier, ordered so stores can list by id.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` denotes the same record.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
