//! Card instance identification.
//!
//! Every `PlayingCard` dealt into a game has a unique `EntityId`. Two
//! instances built from the same roster entry are still distinct cards:
//! their power diverges as they get inspired, so identity is by instance.
//!
//! ## Usage
//!
//! ```
//! use inspire_deck::core::EntityId;
//!
//! let a = EntityId::new(3);
//! let b = EntityId::new(3);
//! assert_eq!(a, b);
//! assert_eq!(a.raw(), 3);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Hands out sequential entity IDs for a single game.
#[derive(Clone, Debug, Default)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ID.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_display() {
        assert_eq!(format!("{}", EntityId::new(7)), "Entity(7)");
    }

    #[test]
    fn test_allocator_is_sequential() {
        let mut alloc = EntityAllocator::new();
        assert_eq!(alloc.alloc(), EntityId(0));
        assert_eq!(alloc.alloc(), EntityId(1));
        assert_eq!(alloc.alloc(), EntityId(2));
        assert_eq!(alloc.allocated(), 3);
    }
}
