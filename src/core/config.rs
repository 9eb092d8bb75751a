//! Game configuration types.
//!
//! The rules are fixed numbers, but they live in one place so tests and
//! front-ends can build shorter games:
//! - `GameConfig`: Rule constants (hand size, energy, rewards, buffs)
//! - `AnimationConfig`: Per-effect progress steps and flyer physics
//!
//! Both follow the same pattern: `Default` carries the shipped values and
//! `with_*` methods override individual fields.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::layout::Layout;

/// Rule constants for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the game RNG. Same seed produces identical draws.
    pub seed: u64,

    /// Maximum number of cards in hand; draws stop once reached.
    pub hand_size: usize,

    /// Power every card starts the game with.
    pub starting_power: i64,

    /// Energy at the start of a game. Reaching zero loses.
    pub starting_energy: i64,

    /// Completed projects needed to win.
    pub win_threshold: i64,

    /// Max HP of the very first spawned project.
    pub initial_project_hp: i64,

    /// Increase of the global max HP counter after every spawn.
    pub project_hp_step: i64,

    /// Energy granted when a project is completed.
    pub completion_energy: i64,

    /// Extra energy when the finishing strike was exactly the remaining HP.
    pub perfect_bonus: i64,

    /// Energy charged per assign or discard.
    pub action_cost: i64,

    /// Power added to inspired cards when the strike completed its project.
    pub buff_on_completed: i64,

    /// Power added to inspired cards otherwise.
    pub buff_on_incomplete: i64,

    /// Frames during which input is ignored after an accepted click or key.
    pub input_cooldown_frames: u32,

    /// Animation steps.
    pub animation: AnimationConfig,

    /// Logical screen positions used for travel distances.
    pub layout: Layout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            hand_size: 6,
            starting_power: 5,
            starting_energy: 10,
            win_threshold: 20,
            initial_project_hp: 10,
            project_hp_step: 5,
            completion_energy: 3,
            perfect_bonus: 1,
            action_cost: 1,
            buff_on_completed: 10,
            buff_on_incomplete: 5,
            input_cooldown_frames: 5,
            animation: AnimationConfig::default(),
            layout: Layout::default(),
        }
    }
}

impl GameConfig {
    /// Override the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the starting energy.
    #[must_use]
    pub fn with_starting_energy(mut self, energy: i64) -> Self {
        self.starting_energy = energy;
        self
    }

    /// Override the number of completions needed to win.
    #[must_use]
    pub fn with_win_threshold(mut self, threshold: i64) -> Self {
        self.win_threshold = threshold;
        self
    }

    /// Override the input cooldown.
    #[must_use]
    pub fn with_input_cooldown(mut self, frames: u32) -> Self {
        self.input_cooldown_frames = frames;
        self
    }

    /// Override the animation steps.
    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }
}

/// Per-effect progress steps, in progress units per tick.
///
/// A step of 0.05 means the effect resolves after 20 ticks. Staggers are
/// negative pre-start delays, so the n-th card of a batch starts at
/// `-n * stagger`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub draw_step: f32,
    pub draw_stagger: f32,
    pub shuffle_step: f32,
    pub shuffle_stagger: f32,
    pub spawn_step: f32,
    pub squish_step: f32,
    pub drain_step: f32,
    pub laser_step: f32,
    /// Peak height of the reward laser's arc above the straight line.
    pub laser_lift: f32,
    /// Logical units travelled per tick by an assigned card.
    pub assign_speed: f32,
    pub discard_step: f32,
    pub inspire_laser_step: f32,
    pub inspire_taker_step: f32,
    /// Scene fade step; a full close/open cycle spans two progress units.
    pub scene_transition_step: f32,
    pub flyer_gravity: f32,
    pub flyer_launch_speed: f32,
    /// Sideways launch velocity, drawn per flyer.
    pub flyer_drift: Range<f32>,
    /// Initial angular velocity, drawn per flyer.
    pub flyer_spin: Range<f32>,
    /// Multiplier applied to the flyer's angular velocity every tick.
    pub flyer_spin_decay: f32,
    /// Flyers below this y coordinate are despawned.
    pub flyer_despawn_y: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            draw_step: 0.08,
            draw_stagger: 0.25,
            shuffle_step: 0.1,
            shuffle_stagger: 0.05,
            spawn_step: 0.05,
            squish_step: 0.1,
            drain_step: 0.05,
            laser_step: 0.04,
            laser_lift: 80.0,
            assign_speed: 25.0,
            discard_step: 0.06,
            inspire_laser_step: 0.05,
            inspire_taker_step: 0.04,
            scene_transition_step: 0.2,
            flyer_gravity: 0.5,
            flyer_launch_speed: 10.0,
            flyer_drift: 2.0..6.0,
            flyer_spin: -0.3..0.3,
            flyer_spin_decay: 0.96,
            flyer_despawn_y: 700.0,
        }
    }
}

impl AnimationConfig {
    /// Every step set to 1.0 and every stagger to 0: each effect resolves on
    /// the tick after it starts. Useful for tests and headless play.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            draw_step: 1.0,
            draw_stagger: 0.0,
            shuffle_step: 1.0,
            shuffle_stagger: 0.0,
            spawn_step: 1.0,
            squish_step: 1.0,
            drain_step: 1.0,
            laser_step: 1.0,
            assign_speed: 10_000.0,
            discard_step: 1.0,
            inspire_laser_step: 1.0,
            inspire_taker_step: 1.0,
            scene_transition_step: 2.0,
            ..Self::default()
        }
    }
}
