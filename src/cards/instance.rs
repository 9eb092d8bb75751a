//! Card instances - runtime card state.
//!
//! `PlayingCard` is one physical card in a game: a roster entry plus the
//! power it has accumulated from inspires. It lives in exactly one deck
//! zone at a time and moves between zones by value.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::entity::EntityId;

/// A card in play.
///
/// Equality is by instance: two cards are the same card only if their
/// `entity_id` matches, whatever their power.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayingCard {
    /// Unique instance ID.
    pub entity_id: EntityId,

    /// Roster entry this card was dealt from.
    pub card_id: CardId,

    /// Damage dealt when assigned. Grows when inspired.
    pub power: i64,
}

impl PartialEq for PlayingCard {
    fn eq(&self, other: &Self) -> bool {
        self.entity_id == other.entity_id
    }
}

impl Eq for PlayingCard {}

impl std::hash::Hash for PlayingCard {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.entity_id.hash(hasher);
    }
}

impl PlayingCard {
    #[must_use]
    pub fn new(entity_id: EntityId, card_id: CardId, power: i64) -> Self {
        Self {
            entity_id,
            card_id,
            power,
        }
    }

    /// Add power from an inspire.
    pub fn buff(&mut self, amount: i64) {
        self.power += amount;
    }
}
