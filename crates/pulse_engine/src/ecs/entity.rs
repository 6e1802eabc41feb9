//! Entity implementation

use std::fmt;

slotmap::new_key_type! {
    /// Generational entity handle
    ///
    /// A handle outlives the entity it names; once the entity is destroyed the
    /// handle resolves to nothing, even if its slot is reused.
    pub struct Entity;
}

/// Stable entity identifier, unique for the lifetime of a [`World`](super::World)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Create an identifier from a raw value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identifier
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
