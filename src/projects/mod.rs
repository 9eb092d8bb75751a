//! Project queue: the four live targets and the completion rewards.

pub mod queue;
pub mod reward;

pub use queue::{HitPhase, HitReport, HitTarget, Project, ProjectQueue};
pub use reward::{Flyer, Laser, RewardCredit};
