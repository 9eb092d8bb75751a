//! Scenes: the menu, play and end screens and the play-scene façade.
//!
//! ## Key Types
//!
//! - `Game`: Owns the scene lifecycle and the current game
//! - `PlayScene`: One game; queries, commands, and the per-frame `tick`
//! - `SceneController`: Current scene and the fade between scenes

pub mod controller;
pub mod game;
pub mod play;

pub use controller::{Scene, SceneController, Transition};
pub use game::Game;
pub use play::{ArtHandle, Command, HandSlot, Key, PlayScene, ProjectSlot};
