//! Routes for saving, listing, loading, and deleting games.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use codebound_core::error::DomainError;
use codebound_session::application::persistence;
use codebound_session::application::query_handlers::SaveSummary;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::ActingUser;
use crate::state::AppState;

/// Request body for POST /save-game.
#[derive(Debug, Deserialize)]
pub struct SaveGameRequest {
    /// Player-supplied name for the save.
    pub save_name: String,
}

/// Request body for POST /load-game and POST /delete-save.
#[derive(Debug, Deserialize)]
pub struct SaveIdRequest {
    /// The save to act on.
    pub save_id: Uuid,
}

/// Response body for POST /save-game.
#[derive(Debug, Serialize)]
pub struct SaveGameResponse {
    /// Always `true`; failures use the error body.
    pub success: bool,
    /// Id of the new record.
    pub save_id: Uuid,
    /// Message for the player.
    pub message: String,
}

/// Response body for POST /load-game and POST /delete-save.
#[derive(Debug, Serialize)]
pub struct SaveCommandResponse {
    /// Always `true`; failures use the error body.
    pub success: bool,
    /// Message for the player.
    pub message: String,
}

/// POST /save-game
#[instrument(skip(state, request))]
async fn save_game(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Json(request): Json<SaveGameRequest>,
) -> Result<Json<SaveGameResponse>, ApiError> {
    let session = state.sessions.lock(&user_id).await;
    let save_id = persistence::save_game(
        &session.game,
        &request.save_name,
        state.clock.as_ref(),
        &*state.saves,
    )
    .await?;

    info!(%save_id, "save created");

    Ok(Json(SaveGameResponse {
        success: true,
        save_id,
        message: format!("Game saved as \"{}\"", request.save_name.trim()),
    }))
}

/// GET /list-saves
#[instrument(skip(state))]
async fn list_saves(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
) -> Result<Json<Vec<SaveSummary>>, ApiError> {
    let saves = persistence::list_saves(&user_id, &*state.saves).await?;
    Ok(Json(saves))
}

/// POST /load-game
#[instrument(skip(state, request), fields(save_id = %request.save_id))]
async fn load_game(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Json(request): Json<SaveIdRequest>,
) -> Result<Json<SaveCommandResponse>, ApiError> {
    let loaded = persistence::load_game(request.save_id, &user_id, &*state.saves).await?;
    let save_name = loaded.save_name.clone().unwrap_or_default();
    state.sessions.replace(&user_id, loaded).await;

    Ok(Json(SaveCommandResponse {
        success: true,
        message: format!("Loaded \"{save_name}\""),
    }))
}

/// POST /delete-save
#[instrument(skip(state, request), fields(save_id = %request.save_id))]
async fn delete_save(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Json(request): Json<SaveIdRequest>,
) -> Result<Json<SaveCommandResponse>, ApiError> {
    let deleted = persistence::delete_save(request.save_id, &user_id, &*state.saves).await?;
    if !deleted {
        return Err(DomainError::SaveNotFound(request.save_id).into());
    }

    Ok(Json(SaveCommandResponse {
        success: true,
        message: "Save deleted".to_owned(),
    }))
}

/// Returns the router for save management.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save-game", post(save_game))
        .route("/list-saves", get(list_saves))
        .route("/load-game", post(load_game))
        .route("/delete-save", post(delete_save))
}
