//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores all card definitions for a game, indexed by
//! `CardId`. Definitions are created once and never mutated; playing cards
//! refer to them by ID.

use super::definition::{AbilityKind, CardDefinition, CardId, Subject};
use super::roster::STANDARD_ROSTER;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use inspire_deck::cards::{CardRegistry, CardId, Subject};
///
/// let registry = CardRegistry::standard();
/// assert_eq!(registry.len(), 32);
///
/// let andrew = registry.get(CardId::new(0)).unwrap();
/// assert_eq!(andrew.name, "andrew");
/// assert_eq!(andrew.subject, Subject::Math);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The 32-card roster the game ships with.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (name, is_male, subject, body, ability) in STANDARD_ROSTER {
            registry.register(name, is_male, subject, body, ability);
        }
        registry
    }

    /// Register a definition with the next free ID and return the ID.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        is_male: bool,
        subject: Subject,
        body: u8,
        ability: AbilityKind,
    ) -> CardId {
        let raw = u8::try_from(self.cards.len()).expect("registry holds at most 256 cards");
        let id = CardId::new(raw);
        self.cards
            .push(CardDefinition::new(id, name, is_male, subject, body, ability));
        id
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(id.index())
    }

    /// Get a card definition by ID, panicking if not found.
    ///
    /// Playing cards are only ever created from registered IDs.
    #[must_use]
    pub fn get_unchecked(&self, id: CardId) -> &CardDefinition {
        self.get(id)
            .unwrap_or_else(|| panic!("{id} not found in registry"))
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }
}
