//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests and replays,
//! a seeded or recorded implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Picks one element uniformly at random from a non-empty slice.
///
/// Returns `None` for an empty slice without consuming randomness.
pub fn choose<'a, T>(rng: &mut dyn DeterministicRng, items: &'a [T]) -> Option<&'a T> {
    let last = u32::try_from(items.len().checked_sub(1)?).ok()?;
    let index = rng.next_u32_range(0, last) as usize;
    items.get(index)
}

/// Production RNG backed by `rand`'s `StdRng`.
#[derive(Debug)]
pub struct StdDeterministicRng {
    inner: StdRng,
}

impl StdDeterministicRng {
    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible RNG from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl DeterministicRng for StdDeterministicRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.inner.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}

/// Hands out one independent random stream per user.
pub trait RngSource: Send + Sync {
    /// A fresh stream for `user_id`.
    fn rng_for(&self, user_id: &str) -> Box<dyn DeterministicRng>;
}

/// Production source. With a seed, each user's stream is derived from the
/// seed and the user id, so a user's draws never depend on other users.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeededRngSource {
    seed: Option<u64>,
}

impl SeededRngSource {
    /// Creates a source; `None` seeds every stream from the OS.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }
}

impl RngSource for SeededRngSource {
    fn rng_for(&self, user_id: &str) -> Box<dyn DeterministicRng> {
        match self.seed {
            Some(seed) => Box::new(StdDeterministicRng::seeded(seed ^ user_key(user_id))),
            None => Box::new(StdDeterministicRng::from_os()),
        }
    }
}

/// FNV-1a over the id bytes; stable across runs and platforms.
fn user_key(user_id: &str) -> u64 {
    user_id.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}
