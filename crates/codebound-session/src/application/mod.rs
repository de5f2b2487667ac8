//! Application services for the Session context.

pub mod dispatcher;
pub mod persistence;
pub mod query_handlers;
pub mod store;
