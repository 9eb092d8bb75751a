//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Context streams**: Independent sequences for different purposes
//!
//! Context streams matter for hover previews: the UI asks for the inspire
//! targets of a random-ability card every frame, and those answers must
//! not consume numbers from the game stream.
//!
//! ```
//! use inspire_deck::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut a = rng.for_context("preview");
//! let mut b = rng.for_context("preview");
//! assert_eq!(a.gen_index(6), b.gen_index(6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed,
    /// and the parent stream is left untouched.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Uniform float in the given range.
    pub fn gen_range_f32(&mut self, range: std::ops::Range<f32>) -> f32 {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
