//! Card system: definitions, roster, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Roster index, also the art handle
//! - `CardDefinition`: Immutable character data
//! - `Subject`, `BodyVariant`, `AbilityKind`: Definition attributes
//! - `PlayingCard`: A dealt card with its current power
//! - `CardRegistry`: Definition lookup

pub mod definition;
pub mod instance;
pub mod registry;
mod roster;

pub use definition::{AbilityKind, BodyVariant, CardDefinition, CardId, Subject};
pub use instance::PlayingCard;
pub use registry::CardRegistry;
