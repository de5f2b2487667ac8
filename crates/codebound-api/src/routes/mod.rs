//! Route modules.

use axum::Router;

use crate::state::AppState;

pub mod game;
pub mod health;
pub mod saves;

/// Every route the server exposes.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api", game::router().merge(saves::router()))
}
