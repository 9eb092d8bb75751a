//! Game rules: the action controller, energy and score, win and loss.
//!
//! ## Key Types
//!
//! - `ActionController`: Selection, assign, discard, and inspire
//! - `Stats`: Energy, completed projects, the game-over latch
//! - `Outcome`: How a finished game ended

pub mod controller;
pub mod stats;

pub use controller::{ActionController, AssignState, AssignTravel, DiscardState, InspireAnimation, InspireState};
pub use stats::{Outcome, Stats};
