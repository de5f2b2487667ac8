//! Domain model for the Session context.

pub mod action;
pub mod game_state;
