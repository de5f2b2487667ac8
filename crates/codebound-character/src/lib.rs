//! Codebound Chronicles: Character & Progression bounded context.
//!
//! Responsible for the player sheet (vitals, purse, inventory, skills,
//! faction standing), experience and leveling, and quest bookkeeping.

pub mod domain;
