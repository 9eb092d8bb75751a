//! Error types for player commands.
//!
//! These are the recoverable rejections: a command arriving while the gate
//! is closed, a slot that does not exist, the wrong number of selected
//! cards. None of them mutate state. Broken invariants (a damage call for a
//! subject with no live project, two empty piles on draw) are programming
//! errors and panic instead.

use thiserror::Error;

use super::entity::EntityId;
use crate::cards::Subject;

/// Command rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// An animation is in flight or the game is over.
    #[error("action blocked until animations settle")]
    ActionBlocked,
    /// Input arrived during the post-click debounce window.
    #[error("input ignored for {frames_left} more frame(s)")]
    InputCooldown { frames_left: u32 },
    /// Another command was already accepted this frame.
    #[error("an input was already accepted this frame")]
    InputAlreadyQueued,
    /// Slot index outside the current hand.
    #[error("hand slot {slot} is empty (hand holds {hand_len} card(s))")]
    InvalidSlot { slot: usize, hand_len: usize },
    /// Assign needs exactly one selected card, discard at least two.
    #[error("{action} needs {need} selected card(s), have {have}")]
    SelectionCount {
        action: &'static str,
        need: &'static str,
        have: usize,
    },
    /// A HitTarget is already open.
    #[error("project {subject} is already being hit")]
    HitInProgress { subject: Subject },
    /// The hand is at capacity.
    #[error("hand is full")]
    HandFull,
    /// The command is not valid in the current scene.
    #[error("command not available in the {scene} scene")]
    WrongScene { scene: &'static str },
}

/// Result type alias for game commands.
pub type GameResult<T> = Result<T, GameError>;

/// Broken structural invariants, reported by the `check_invariants` methods.
///
/// These never occur in a correct engine; tests and debug builds use them
/// to pinpoint which invariant broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("deck zones hold {found} card(s), expected {expected}")]
    CardCount { expected: usize, found: usize },
    #[error("{entity} appears in more than one zone slot")]
    DuplicateCard { entity: EntityId },
    #[error("hand holds {len} card(s), capacity is {capacity}")]
    HandOverflow { len: usize, capacity: usize },
    #[error("project queue holds {found} project(s), expected {expected}")]
    ProjectCount { expected: usize, found: usize },
    #[error("subject {subject} has {count} live project(s)")]
    SubjectCount { subject: Subject, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GameError::SelectionCount {
            action: "discard",
            need: "at least 2",
            have: 1,
        };
        assert_eq!(err.to_string(), "discard needs at least 2 selected card(s), have 1");

        let err = GameError::InvalidSlot { slot: 7, hand_len: 6 };
        assert_eq!(err.to_string(), "hand slot 7 is empty (hand holds 6 card(s))");

        let err = GameError::HitInProgress { subject: Subject::Math };
        assert_eq!(err.to_string(), "project math is already being hit");
    }
}
