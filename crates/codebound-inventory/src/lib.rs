//! Codebound Chronicles: Economy bounded context.
//!
//! Responsible for spending currency: resting to recover hit points and
//! browsing the fixed shop catalog.

pub mod domain;
