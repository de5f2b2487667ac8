//! Codebound Chronicles HTTP API.
//!
//! A thin JSON adapter over the session crate. The acting user comes from
//! the `x-user-id` header, which an upstream auth layer is trusted to set.

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

/// Builds the application router.
pub fn app(state: state::AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
