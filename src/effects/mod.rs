//! Card abilities.
//!
//! ## Key Types
//!
//! - `InspireSelector`: Applies a card's `AbilityKind` to the current hand
//! - `get_inspired` / `preview_inspired`: Resolution and hover entry points

pub mod inspire;

pub use inspire::{get_inspired, preview_inspired, InspireSelector, InspireTargets};
