//! Test RNG: deterministic `DeterministicRng` implementations for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use codebound_core::rng::{DeterministicRng, RngSource};

/// A no-op RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Suitable for tests that do not depend on specific random
/// values. With `0.0`, exploration always produces an encounter.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from predetermined sequences. Integer draws
/// and float draws are consumed from separate queues. Panics if an integer
/// sequence is exhausted; an exhausted float queue yields `0.0`.
#[derive(Debug)]
pub struct SequenceRng {
    values: VecDeque<u32>,
    floats: VecDeque<f64>,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given integer values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values: values.into(),
            floats: VecDeque::new(),
        }
    }

    /// Queue float values returned by `next_f64`.
    #[must_use]
    pub fn with_floats(mut self, floats: Vec<f64>) -> Self {
        self.floats = floats.into();
        self
    }

    /// Integer values not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let val = self
            .values
            .pop_front()
            .expect("SequenceRng exhausted: queue more values for this test");
        assert!(
            (min..=max).contains(&val),
            "SequenceRng value {val} outside requested range [{min}, {max}]"
        );
        val
    }

    fn next_f64(&mut self) -> f64 {
        self.floats.pop_front().unwrap_or(0.0)
    }
}

/// An `RngSource` that hands each user a pre-scripted `SequenceRng`.
/// Users without a script get an empty one, which panics on first draw.
#[derive(Debug, Default)]
pub struct ScriptedRngSource {
    scripts: Mutex<HashMap<String, SequenceRng>>,
}

impl ScriptedRngSource {
    /// Create a source with no scripts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the stream `user_id` receives on first access.
    #[must_use]
    pub fn with_user(self, user_id: &str, rng: SequenceRng) -> Self {
        self.scripts.lock().unwrap().insert(user_id.to_owned(), rng);
        self
    }
}

impl RngSource for ScriptedRngSource {
    fn rng_for(&self, user_id: &str) -> Box<dyn DeterministicRng> {
        let script = self.scripts.lock().unwrap().remove(user_id);
        Box::new(script.unwrap_or_else(|| SequenceRng::new(Vec::new())))
    }
}

