//! Core engine types: entities, RNG, configuration, progress, errors, events.
//!
//! These are the building blocks every other module leans on. None of them
//! know about decks or projects beyond the types they carry.

pub mod config;
pub mod entity;
pub mod error;
pub mod event;
pub mod layout;
pub mod progress;
pub mod rng;

pub use config::{AnimationConfig, GameConfig};
pub use entity::{EntityAllocator, EntityId};
pub use error::{GameError, GameResult, InvariantError};
pub use event::{EventLog, GameEvent};
pub use layout::Layout;
pub use progress::Progress;
pub use rng::GameRng;
