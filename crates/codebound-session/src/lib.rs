//! Codebound Chronicles: Session bounded context.
//!
//! Owns the per-user `GameState` aggregate, dispatches player actions to
//! the narrative, rules, character, and economy resolvers, and saves and
//! restores snapshots through a `SaveRepository`.

pub mod application;
pub mod domain;
