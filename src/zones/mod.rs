//! Deck zones: draw pile, hand, discard pile, and hand selection.
//!
//! ## Key Types
//!
//! - `DeckEngine`: Owns the three piles, draws, discards, reshuffles
//! - `Selection`: Per-slot selection flags for the hand
//! - `DrawAnimation`, `ShuffleAnimation`: In-flight card moves

pub mod deck;
pub mod selection;

pub use deck::{DeckEngine, DrawAnimation, ShuffleAnimation};
pub use selection::{Selection, SelectionAction};
