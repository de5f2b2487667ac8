//! Domain model for the Economy context.

pub mod rest;
pub mod shop;
