//! Domain model for the Narrative State Machine.

pub mod outcome;
pub mod stage;
pub mod story;
