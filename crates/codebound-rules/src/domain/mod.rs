//! Domain model for exploration and combat.

pub mod areas;
pub mod combat;
pub mod enemies;
pub mod exploration;
