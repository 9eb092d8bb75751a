//! Logical screen geometry.
//!
//! The engine never draws, but assign travel is distance based, so it needs
//! to know where hand slots and project slots sit on the logical 600x600
//! canvas. Renderers scale these coordinates to the real canvas themselves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Slot positions on the logical canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Center of hand slot 0.
    pub hand_origin: Vec2,
    /// Horizontal distance between hand slots.
    pub hand_spacing: f32,
    /// Center of project slot 0.
    pub project_origin: Vec2,
    /// Vertical distance between project slots.
    pub project_spacing: f32,
    /// Where the draw pile sits; drawn cards fly from here.
    pub draw_pile: Vec2,
    /// Where the discard pile sits.
    pub discard_pile: Vec2,
    /// Energy and score counters; reward lasers land here.
    pub stats_panel: Vec2,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            hand_origin: Vec2::new(75.0, 500.0),
            hand_spacing: 90.0,
            project_origin: Vec2::new(100.0, 100.0),
            project_spacing: 50.0,
            draw_pile: Vec2::new(560.0, 560.0),
            discard_pile: Vec2::new(40.0, 560.0),
            stats_panel: Vec2::new(500.0, 100.0),
        }
    }
}

impl Layout {
    /// Center of a hand slot.
    #[must_use]
    pub fn hand_slot(&self, slot: usize) -> Vec2 {
        Vec2::new(
            self.hand_origin.x + self.hand_spacing * slot as f32,
            self.hand_origin.y,
        )
    }

    /// Center of a project slot.
    #[must_use]
    pub fn project_slot(&self, slot: usize) -> Vec2 {
        Vec2::new(
            self.project_origin.x,
            self.project_origin.y + self.project_spacing * slot as f32,
        )
    }
}
