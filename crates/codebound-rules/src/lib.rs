//! Codebound Chronicles: Exploration & Combat Resolution bounded context.
//!
//! Responsible for randomized exploration (encounters and loot) and
//! turn-based combat against the fixed enemy table. All randomness comes
//! from an injected `DeterministicRng`.

pub mod domain;
