//! Deterministic RNG seat for L2 random replacement.
//!
//! Seeded independently of any process-global RNG (spec.md §9), so that
//! two runs with the same trace, geometry, and seed produce bit-identical
//! replacement decisions and therefore bit-identical statistics
//! (spec.md §5 ordering guarantees, §8 determinism property).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Wraps a `StdRng`, seeded either explicitly or from OS entropy.
pub struct ReplacementRng {
    inner: StdRng,
}

impl ReplacementRng {
    pub fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { inner }
    }

    /// Draw a uniformly random victim way in `0..associativity`.
    pub fn victim(&mut self, associativity: usize) -> usize {
        self.inner.random_range(0..associativity)
    }
}

impl std::fmt::Debug for ReplacementRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplacementRng").finish_non_exhaustive()
    }
}
