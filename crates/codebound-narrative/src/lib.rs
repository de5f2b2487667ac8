//! Codebound Chronicles: Narrative State Machine bounded context.
//!
//! A closed, four-stage story graph. Each stage offers choices `a` to `d`;
//! each `(stage, choice)` pair is bound to exactly one outcome that either
//! advances to a later stage or ends the story.

pub mod domain;
