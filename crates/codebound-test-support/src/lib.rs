//! Shared test fakes and utilities for the Codebound Chronicles engine.

mod clock;
mod repository;
mod rng;

pub use clock::{FixedClock, fixed_clock};
pub use repository::{FailingSaveRepository, InMemorySaveRepository};
pub use rng::{MockRng, ScriptedRngSource, SequenceRng};
