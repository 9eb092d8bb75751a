//! Domain events.
//!
//! The engine records what happened during a tick so the presentation
//! layer can react (popups, counters, sounds it owns) without diffing
//! snapshots. Events are informational only; nothing inside the engine
//! reads them back.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;
use crate::cards::Subject;
use crate::rules::Outcome;

/// Something observable that happened during a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card moved from the draw pile into the hand.
    CardDrawn { card: EntityId },
    /// The discard pile became the draw pile.
    Reshuffled { cards: usize },
    /// Cards moved from the hand into the discard pile.
    CardsDiscarded { cards: SmallVec<[EntityId; 6]> },
    /// Energy was charged for an assign or discard.
    EnergyCharged { cost: i64, remaining: i64 },
    /// A card started travelling towards its project.
    CardAssigned { card: EntityId, subject: Subject },
    /// A card reached its project while another hit was still open.
    StrikeSkipped { card: EntityId },
    /// A project took damage.
    ProjectHit {
        subject: Subject,
        amount: i64,
        previous_hp: i64,
        hp: i64,
        completed: bool,
        perfect: bool,
    },
    /// A completed project left the queue.
    ProjectCompleted { subject: Subject, perfect: bool },
    /// A project joined the queue.
    ProjectSpawned { subject: Subject, max_hp: i64 },
    /// The completion reward landed.
    RewardCredited { energy: i64, completed_amount: i64 },
    /// Inspired cards received their power buff.
    CardsInspired {
        source: EntityId,
        targets: SmallVec<[EntityId; 6]>,
        buff: i64,
    },
    /// The game reached a terminal condition.
    GameOver { outcome: Outcome },
}

/// Per-game event buffer, drained by the presentation layer.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all buffered events, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Buffered events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_log() {
        let mut log = EventLog::new();
        log.push(GameEvent::Reshuffled { cards: 12 });
        log.push(GameEvent::CardDrawn { card: EntityId(3) });
        assert_eq!(log.len(), 2);

        let drained = log.drain();
        assert_eq!(drained[0], GameEvent::Reshuffled { cards: 12 });
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::ProjectHit {
            subject: Subject::Science,
            amount: 5,
            previous_hp: 10,
            hp: 5,
            completed: false,
            perfect: false,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
