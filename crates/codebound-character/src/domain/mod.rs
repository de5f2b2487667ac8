//! Domain model for the Character & Progression context.

pub mod player;
pub mod progression;
pub mod quest;
