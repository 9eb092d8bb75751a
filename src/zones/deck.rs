//! Deck engine: draw pile, hand, and discard pile.
//!
//! The `DeckEngine` owns every `PlayingCard` in the game. A card is always
//! in exactly one of the three piles, and the piles together always hold
//! the full deck.
//!
//! Moves are logical first, visual second: a drawn card joins the hand the
//! moment it is drawn, but it carries a `Progress` until its fly-in has
//! played. While any draw or shuffle progress is in flight the engine is
//! busy, and the controller keeps input closed.
//!
//! ## Usage
//!
//! ```
//! use inspire_deck::cards::{CardId, PlayingCard};
//! use inspire_deck::core::{EntityId, EventLog, GameConfig, GameRng};
//! use inspire_deck::zones::DeckEngine;
//!
//! let config = GameConfig::default();
//! let cards = (0..32)
//!     .map(|i| PlayingCard::new(EntityId(i), CardId::new(i as u8), 5))
//!     .collect();
//! let mut deck = DeckEngine::new(cards, &config);
//! let mut rng = GameRng::new(1);
//! let mut events = EventLog::new();
//!
//! deck.fill_hand(&mut rng, &mut events);
//! assert_eq!(deck.hand().len(), 6);
//! assert_eq!(deck.draw_pile_count(), 26);
//! assert!(deck.is_busy());
//! ```

use im::Vector;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::debug;

use super::selection::Selection;
use crate::cards::PlayingCard;
use crate::core::config::{AnimationConfig, GameConfig};
use crate::core::entity::EntityId;
use crate::core::error::{GameError, GameResult, InvariantError};
use crate::core::event::{EventLog, GameEvent};
use crate::core::progress::Progress;
use crate::core::rng::GameRng;

/// A card flying from the draw pile into its hand slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawAnimation {
    pub card: EntityId,
    pub progress: Progress,
}

/// A card flying from the discard pile back onto the draw pile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShuffleAnimation {
    pub card: EntityId,
    pub progress: Progress,
}

#[derive(Clone, Copy, Debug)]
struct DeckTiming {
    draw_step: f32,
    draw_stagger: f32,
    shuffle_step: f32,
    shuffle_stagger: f32,
}

impl From<&AnimationConfig> for DeckTiming {
    fn from(anim: &AnimationConfig) -> Self {
        Self {
            draw_step: anim.draw_step,
            draw_stagger: anim.draw_stagger,
            shuffle_step: anim.shuffle_step,
            shuffle_stagger: anim.shuffle_stagger,
        }
    }
}

/// Owns the three piles and their in-flight animations.
///
/// Draws pick a uniformly random index from the draw pile, so pile order
/// never matters; reshuffling just hands the discard pile over.
#[derive(Clone, Debug)]
pub struct DeckEngine {
    draw_pile: Vector<PlayingCard>,
    discard_pile: Vector<PlayingCard>,
    hand: Vec<PlayingCard>,
    hand_size: usize,
    total_cards: usize,
    drawing: Vec<DrawAnimation>,
    shuffling: Vec<ShuffleAnimation>,
    timing: DeckTiming,
}

impl DeckEngine {
    /// Put every card on the draw pile. The hand starts empty.
    #[must_use]
    pub fn new(cards: Vec<PlayingCard>, config: &GameConfig) -> Self {
        let total_cards = cards.len();
        Self {
            draw_pile: cards.into_iter().collect(),
            discard_pile: Vector::new(),
            hand: Vec::with_capacity(config.hand_size),
            hand_size: config.hand_size,
            total_cards,
            drawing: Vec::new(),
            shuffling: Vec::new(),
            timing: DeckTiming::from(&config.animation),
        }
    }

    // === Queries ===

    /// Cards in hand, slot order.
    #[must_use]
    pub fn hand(&self) -> &[PlayingCard] {
        &self.hand
    }

    /// Card in a hand slot.
    #[must_use]
    pub fn card(&self, slot: usize) -> Option<&PlayingCard> {
        self.hand.get(slot)
    }

    /// Slot of a card instance in the hand.
    #[must_use]
    pub fn slot_of(&self, entity: EntityId) -> Option<usize> {
        self.hand.iter().position(|c| c.entity_id == entity)
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    #[must_use]
    pub fn is_hand_full(&self) -> bool {
        self.hand.len() >= self.hand_size
    }

    #[must_use]
    pub fn draw_pile_count(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_pile_count(&self) -> usize {
        self.discard_pile.len()
    }

    /// Snapshot of the draw pile for the browse view. O(1).
    #[must_use]
    pub fn draw_pile_view(&self) -> Vector<PlayingCard> {
        self.draw_pile.clone()
    }

    /// Snapshot of the discard pile. O(1).
    #[must_use]
    pub fn discard_pile_view(&self) -> Vector<PlayingCard> {
        self.discard_pile.clone()
    }

    /// Total cards across all piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Fly-in progress of a card that is still being drawn.
    #[must_use]
    pub fn draw_progress(&self, entity: EntityId) -> Option<Progress> {
        self.drawing
            .iter()
            .find(|a| a.card == entity)
            .map(|a| a.progress)
    }

    /// Cards currently flying back onto the draw pile.
    #[must_use]
    pub fn shuffle_animations(&self) -> &[ShuffleAnimation] {
        &self.shuffling
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        !self.drawing.is_empty()
    }

    #[must_use]
    pub fn is_shuffling(&self) -> bool {
        !self.shuffling.is_empty()
    }

    /// Mid-draw or mid-shuffle.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.is_drawing() || self.is_shuffling()
    }

    // === Mutations ===

    /// Turn the discard pile into the draw pile.
    ///
    /// Does nothing while the draw pile still has cards. Panics if both
    /// piles are empty: with the whole deck partitioned across three piles
    /// and at most `hand_size` in hand, that means cards were lost.
    pub fn reshuffle(&mut self, events: &mut EventLog) {
        if !self.draw_pile.is_empty() {
            return;
        }
        assert!(
            !self.discard_pile.is_empty(),
            "cannot reshuffle: draw and discard piles are both empty ({} in hand of {})",
            self.hand.len(),
            self.total_cards
        );

        let moved = std::mem::take(&mut self.discard_pile);
        let count = moved.len();
        for (i, card) in moved.iter().enumerate() {
            self.shuffling.push(ShuffleAnimation {
                card: card.entity_id,
                progress: Progress::delayed(
                    self.timing.shuffle_step,
                    self.timing.shuffle_stagger * i as f32,
                ),
            });
        }
        self.draw_pile = moved;

        debug!(cards = count, "reshuffled discard pile into draw pile");
        events.push(GameEvent::Reshuffled { cards: count });
    }

    /// Move one random card from the draw pile into the hand.
    ///
    /// Reshuffles first if the draw pile is empty. Refused when the hand
    /// is full.
    pub fn draw_one(&mut self, rng: &mut GameRng, events: &mut EventLog) -> GameResult<EntityId> {
        if self.is_hand_full() {
            return Err(GameError::HandFull);
        }
        if self.draw_pile.is_empty() {
            self.reshuffle(events);
        }

        let index = rng.gen_index(self.draw_pile.len());
        let card = self.draw_pile.remove(index);
        let entity = card.entity_id;

        let in_flight = self.drawing.len();
        self.drawing.push(DrawAnimation {
            card: entity,
            progress: Progress::delayed(
                self.timing.draw_step,
                self.timing.draw_stagger * in_flight as f32,
            ),
        });
        self.hand.push(card);

        debug!(%entity, slot = self.hand.len() - 1, "drew card");
        events.push(GameEvent::CardDrawn { card: entity });
        Ok(entity)
    }

    /// Draw until the hand is full. Returns the number of cards drawn.
    pub fn fill_hand(&mut self, rng: &mut GameRng, events: &mut EventLog) -> usize {
        let mut drawn = 0;
        while self.draw_one(rng, events).is_ok() {
            drawn += 1;
        }
        drawn
    }

    /// Move the given hand slots to the discard pile.
    ///
    /// Slots are removed in descending order so the lower indices stay
    /// valid during removal. Validates every slot before moving anything.
    pub fn discard_slots(
        &mut self,
        slots: &[usize],
        events: &mut EventLog,
    ) -> GameResult<SmallVec<[EntityId; 6]>> {
        let mut ordered: SmallVec<[usize; 6]> = slots.iter().copied().collect();
        ordered.sort_unstable_by(|a, b| b.cmp(a));
        ordered.dedup();

        if let Some(&slot) = ordered.iter().find(|&&s| s >= self.hand.len()) {
            return Err(GameError::InvalidSlot {
                slot,
                hand_len: self.hand.len(),
            });
        }

        let mut moved = SmallVec::new();
        for slot in ordered {
            let card = self.hand.remove(slot);
            moved.push(card.entity_id);
            self.discard_pile.push_back(card);
        }

        debug!(cards = moved.len(), "discarded cards");
        events.push(GameEvent::CardsDiscarded {
            cards: moved.clone(),
        });
        Ok(moved)
    }

    /// Move one played card to the discard pile and refill the hand.
    pub fn discard_slot(
        &mut self,
        slot: usize,
        rng: &mut GameRng,
        events: &mut EventLog,
    ) -> GameResult<EntityId> {
        let moved = self.discard_slots(&[slot], events)?;
        self.fill_hand(rng, events);
        Ok(moved[0])
    }

    /// Discard every selected slot, clear the selection, refill the hand.
    pub fn discard_selected(
        &mut self,
        selection: &mut Selection,
        rng: &mut GameRng,
        events: &mut EventLog,
    ) -> GameResult<SmallVec<[EntityId; 6]>> {
        let moved = self.discard_slots(&selection.selected_slots(), events)?;
        selection.clear();
        self.fill_hand(rng, events);
        Ok(moved)
    }

    /// Add power to the card in a slot.
    pub fn buff_slot(&mut self, slot: usize, amount: i64) -> Option<EntityId> {
        let card = self.hand.get_mut(slot)?;
        card.buff(amount);
        Some(card.entity_id)
    }

    /// Step every draw and shuffle animation once, dropping finished ones.
    pub fn advance(&mut self) {
        self.drawing.retain_mut(|a| {
            a.progress.advance();
            !a.progress.is_done()
        });
        self.shuffling.retain_mut(|a| {
            a.progress.advance();
            !a.progress.is_done()
        });
    }

    /// Check the partition invariant: every card in exactly one pile, no
    /// duplicates, hand within capacity.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let found = self.draw_pile.len() + self.discard_pile.len() + self.hand.len();
        if found != self.total_cards {
            return Err(InvariantError::CardCount {
                expected: self.total_cards,
                found,
            });
        }
        if self.hand.len() > self.hand_size {
            return Err(InvariantError::HandOverflow {
                len: self.hand.len(),
                capacity: self.hand_size,
            });
        }

        let mut seen = FxHashSet::default();
        let all = self
            .draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.hand.iter());
        for card in all {
            if !seen.insert(card.entity_id) {
                return Err(InvariantError::DuplicateCard {
                    entity: card.entity_id,
                });
            }
        }
        Ok(())
    }
}
