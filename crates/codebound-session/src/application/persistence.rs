//! Save, load, list, and delete game snapshots.
//!
//! The owner is stored inside every record and checked here on top of the
//! repository's own check. A record owned by someone else is reported
//! exactly like a missing one.

use codebound_core::clock::Clock;
use codebound_core::error::DomainError;
use codebound_core::repository::{SaveRepository, StoredSave};
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::query_handlers::SaveSummary;
use crate::domain::game_state::GameState;

/// Longest save name or user id a record may carry, in characters.
pub const MAX_RECORD_TEXT_LEN: usize = 255;

/// Writes a snapshot of `state` under a fresh id and returns the id.
///
/// The snapshot carries the new save metadata; `state` itself is left
/// unchanged.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank or overlong save name or
/// an overlong user id, and `DomainError::Infrastructure` if
/// serialization or the write fails.
pub async fn save_game(
    state: &GameState,
    save_name: &str,
    clock: &dyn Clock,
    repo: &dyn SaveRepository,
) -> Result<Uuid, DomainError> {
    let save_name = save_name.trim();
    if save_name.is_empty() {
        return Err(DomainError::validation("Save name is required"));
    }
    if save_name.chars().count() > MAX_RECORD_TEXT_LEN {
        return Err(DomainError::validation(format!(
            "Save name must be at most {MAX_RECORD_TEXT_LEN} characters"
        )));
    }
    if state.user_id.chars().count() > MAX_RECORD_TEXT_LEN {
        return Err(DomainError::validation(format!(
            "User id must be at most {MAX_RECORD_TEXT_LEN} characters"
        )));
    }

    let save_id = Uuid::new_v4();
    let save_date = clock.now();
    let mut snapshot = state.clone();
    snapshot.save_id = Some(save_id);
    snapshot.save_name = Some(save_name.to_owned());
    snapshot.save_date = Some(save_date);

    repo.insert_save(StoredSave {
        save_id,
        user_id: snapshot.user_id.clone(),
        save_name: save_name.to_owned(),
        save_date,
        payload: serde_json::to_value(&snapshot)?,
    })
    .await?;

    info!(%save_id, user_id = %state.user_id, "game saved");
    Ok(save_id)
}

/// Loads the snapshot `save_id` on behalf of `user_id`.
///
/// # Errors
///
/// Returns `DomainError::SaveNotFound` if the record is missing or owned by
/// another user, and `DomainError::Infrastructure` if it cannot be read.
pub async fn load_game(
    save_id: Uuid,
    user_id: &str,
    repo: &dyn SaveRepository,
) -> Result<GameState, DomainError> {
    let stored = repo
        .find_save(save_id, user_id)
        .await?
        .filter(|stored| stored.user_id == user_id)
        .ok_or(DomainError::SaveNotFound(save_id))?;

    let state: GameState = serde_json::from_value(stored.payload).map_err(|err| {
        DomainError::Infrastructure(format!("save {save_id} is unreadable: {err}"))
    })?;
    if state.user_id != user_id {
        return Err(DomainError::SaveNotFound(save_id));
    }
    state.player.check_invariants().map_err(|reason| {
        DomainError::Infrastructure(format!("save {save_id} is unreadable: {reason}"))
    })?;

    info!(%save_id, user_id, "game loaded");
    Ok(state)
}

/// Lists `user_id`'s saves, newest first. Records whose payload cannot be
/// summarized are skipped.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the repository itself fails.
pub async fn list_saves(
    user_id: &str,
    repo: &dyn SaveRepository,
) -> Result<Vec<SaveSummary>, DomainError> {
    let mut summaries: Vec<SaveSummary> = repo
        .list_saves(user_id)
        .await?
        .into_iter()
        .filter(|stored| stored.user_id == user_id)
        .filter_map(|stored| match SaveSummary::from_stored(&stored) {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!(save_id = %stored.save_id, error = %err, "skipping unreadable save");
                None
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.save_date.cmp(&a.save_date));
    Ok(summaries)
}

/// Deletes `save_id` on behalf of `user_id`. Returns `false` when the
/// record is missing or owned by someone else.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the repository fails.
pub async fn delete_save(
    save_id: Uuid,
    user_id: &str,
    repo: &dyn SaveRepository,
) -> Result<bool, DomainError> {
    let owned = repo
        .find_save(save_id, user_id)
        .await?
        .is_some_and(|stored| stored.user_id == user_id);
    if !owned {
        return Ok(false);
    }

    let deleted = repo.delete_save(save_id, user_id).await?;
    info!(%save_id, user_id, deleted, "save deleted");
    Ok(deleted)
}
