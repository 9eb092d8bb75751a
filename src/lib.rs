//! # inspire-deck
//!
//! Gameplay engine for a single-player card game. A deck of 32 character
//! cards is played against a queue of four projects, one per subject.
//! Assigning a card damages the project of its subject; discarding two or
//! more cards redraws them. Both cost energy. Played cards may inspire
//! other cards in hand, raising their power.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The engine never draws. It exposes snapshots and
//!    accepts commands; a renderer polls the former and sends the latter.
//!
//! 2. **Frame-Driven**: Every multi-frame effect is a `Progress`
//!    accumulator stepped once per `tick()`. State changes fire exactly
//!    once, on the tick an accumulator resolves.
//!
//! 3. **One Gate**: Input is accepted only while no animation that
//!    matters is in flight and the game is not over.
//!
//! 4. **Deterministic**: All randomness flows through a seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, RNG, configuration, progress, errors, events
//! - `cards`: Roster, definitions, registry, and card instances
//! - `zones`: Draw pile, hand, discard pile, and selection
//! - `effects`: Inspire target selection
//! - `projects`: Project queue, hits, and completion rewards
//! - `rules`: Action controller, energy, score, and win/loss
//! - `scenes`: Scene lifecycle and the play-scene façade

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod projects;
pub mod rules;
pub mod scenes;

// Re-export commonly used types
pub use crate::core::{
    AnimationConfig, GameConfig,
    EntityId, GameRng,
    GameError, GameResult, InvariantError,
    EventLog, GameEvent,
    Layout, Progress,
};

pub use crate::cards::{AbilityKind, BodyVariant, CardDefinition, CardId, CardRegistry, PlayingCard, Subject};

pub use crate::zones::{DeckEngine, Selection};

pub use crate::effects::{get_inspired, preview_inspired};

pub use crate::projects::{HitTarget, ProjectQueue, RewardCredit};

pub use crate::rules::{ActionController, Outcome, Stats};

pub use crate::scenes::{ArtHandle, Game, HandSlot, Key, PlayScene, ProjectSlot, Scene};
