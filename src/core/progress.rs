//! Progress accumulators.
//!
//! Every multi-frame effect in the game is a `Progress`: a value that starts
//! at zero (or below zero, for a pre-start delay) and moves towards 1 by a
//! fixed step once per tick. The effect is pending while the value is below
//! 1 and resolved once it reaches 1. `advance` reports the resolving tick
//! exactly once, which is where callers fire their side effects.
//!
//! ```
//! use inspire_deck::core::Progress;
//!
//! let mut p = Progress::new(0.5);
//! assert!(!p.advance());
//! assert!(p.advance()); // reached 1 on this tick
//! assert!(!p.advance()); // stays resolved, never fires again
//! assert!(p.is_done());
//! ```

use serde::{Deserialize, Serialize};

/// A single progress accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    value: f32,
    step: f32,
}

impl Progress {
    /// Start at zero.
    #[must_use]
    pub fn new(step: f32) -> Self {
        Self::delayed(step, 0.0)
    }

    /// Start at `-delay`, so the effect stays invisible for a while.
    #[must_use]
    pub fn delayed(step: f32, delay: f32) -> Self {
        debug_assert!(step > 0.0, "progress step must be positive");
        Self {
            value: -delay.max(0.0),
            step,
        }
    }

    /// Already resolved.
    #[must_use]
    pub fn finished() -> Self {
        Self { value: 1.0, step: 1.0 }
    }

    /// Raw value, negative during the pre-start delay.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value clamped to `[0, 1]` for renderers.
    #[must_use]
    pub fn visible(&self) -> f32 {
        self.value.clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.value >= 1.0
    }

    /// Has the value reached `mark` (e.g. a phase midpoint)?
    #[must_use]
    pub fn has_reached(&self, mark: f32) -> bool {
        self.value >= mark
    }

    /// Step once. Returns `true` only on the tick the value reaches 1.
    pub fn advance(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.value = (self.value + self.step).min(1.0);
        self.is_done()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once() {
        let mut p = Progress::new(0.25);
        let fired: Vec<bool> = (0..6).map(|_| p.advance()).collect();
        assert_eq!(fired, vec![false, false, false, true, false, false]);
    }

    #[test]
    fn test_delay_postpones_resolution() {
        let mut p = Progress::delayed(0.5, 0.5);
        assert_eq!(p.visible(), 0.0);
        assert!(!p.advance()); // 0.0
        assert!(!p.advance()); // 0.5
        assert!(p.advance()); // 1.0
    }

    #[test]
    fn test_step_never_overshoots() {
        let mut p = Progress::new(0.3);
        for _ in 0..10 {
            p.advance();
        }
        assert_eq!(p.value(), 1.0);
    }

    #[test]
    fn test_midpoint() {
        let mut p = Progress::new(0.1);
        for _ in 0..4 {
            p.advance();
        }
        assert!(!p.has_reached(0.5));
        p.advance();
        p.advance();
        assert!(p.has_reached(0.5));
    }

    #[test]
    fn test_finished() {
        let mut p = Progress::finished();
        assert!(p.is_done());
        assert!(!p.advance());
    }
}
