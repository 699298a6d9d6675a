//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests, a seeded or scripted
//! implementation is injected so narrative-style and voice choices are
//! repeatable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG seeded from the operating system.
#[derive(Debug)]
pub struct StdRngSource(StdRng);

impl StdRngSource {
    /// Creates a new source seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates a new source from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for StdRngSource {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Picks one element of `options` uniformly at random.
///
/// Returns `None` only when `options` is empty. Out-of-range values from a
/// scripted RNG are clamped to the last option.
pub fn pick_one<'a, T>(options: &'a [T], rng: &mut dyn DeterministicRng) -> Option<&'a T> {
    let last = options.len().checked_sub(1)?;
    let max = u32::try_from(last).unwrap_or(u32::MAX);
    let index = rng.next_u32_range(0, max) as usize;
    options.get(index.min(last))
}
