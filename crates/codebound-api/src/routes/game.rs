//! Routes for playing: state query, actions, hints, and restart.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use codebound_core::error::DomainError;
use codebound_session::application::query_handlers::GameStateView;
use codebound_session::domain::action::{ActionRequest, ActionResponse};
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::extract::ActingUser;
use crate::state::AppState;

/// Response body for GET /update-actions.
#[derive(Debug, Serialize)]
pub struct AvailableActionsResponse {
    /// Hint list of what the player can do next.
    pub available_actions: Vec<String>,
}

/// Response body for state-replacing commands.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// Always `true`; failures use the error body.
    pub success: bool,
    /// Message for the player.
    pub message: String,
}

/// GET /game-state
#[instrument(skip(state))]
async fn game_state(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = state.sessions.lock(&user_id).await;
    let body =
        serde_json::to_value(GameStateView::of(&session.game)).map_err(DomainError::from)?;
    Ok(Json(body))
}

/// POST /action
#[instrument(skip(state, request), fields(action = %request.action))]
async fn perform_action(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Json(request): Json<ActionRequest>,
) -> Json<ActionResponse> {
    let mut guard = state.sessions.lock(&user_id).await;
    let session = &mut *guard;
    Json(
        state
            .engine
            .dispatch(&mut session.game, &request, session.rng.as_mut()),
    )
}

/// GET /update-actions
#[instrument(skip(state))]
async fn update_actions(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
) -> Json<AvailableActionsResponse> {
    let mut session = state.sessions.lock(&user_id).await;
    session.game.refresh_actions();
    Json(AvailableActionsResponse {
        available_actions: session.game.available_actions.clone(),
    })
}

/// POST /restart-game
#[instrument(skip(state))]
async fn restart_game(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
) -> Json<CommandResponse> {
    state.sessions.restart(&user_id).await;
    info!("game restarted");
    Json(CommandResponse {
        success: true,
        message: "A new game has begun.".to_owned(),
    })
}

/// Returns the router for playing the game.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/game-state", get(game_state))
        .route("/action", post(perform_action))
        .route("/update-actions", get(update_actions))
        .route("/restart-game", post(restart_game))
}
