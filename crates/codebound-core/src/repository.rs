//! Save repository abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of a save record.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSave {
    /// Unique save identifier.
    pub save_id: Uuid,
    /// User that owns the record.
    pub user_id: String,
    /// Player-supplied save name.
    pub save_name: String,
    /// Timestamp of record creation.
    pub save_date: DateTime<Utc>,
    /// Serialized game state snapshot.
    pub payload: serde_json::Value,
}

/// Repository trait for durable, owner-scoped save records.
///
/// Implementations store the owner inside the record and must compare it
/// on every read and delete; a record owned by someone else is reported
/// exactly like a missing one.
#[async_trait]
pub trait SaveRepository: Send + Sync {
    /// Writes a new record.
    async fn insert_save(&self, save: StoredSave) -> Result<(), DomainError>;

    /// Loads a record if it exists and belongs to `user_id`.
    async fn find_save(&self, save_id: Uuid, user_id: &str)
    -> Result<Option<StoredSave>, DomainError>;

    /// Lists every readable record owned by `user_id`, in no particular
    /// order. Unreadable records are skipped rather than failing the call.
    async fn list_saves(&self, user_id: &str) -> Result<Vec<StoredSave>, DomainError>;

    /// Deletes a record owned by `user_id`. Returns `false` when nothing
    /// was deleted.
    async fn delete_save(&self, save_id: Uuid, user_id: &str) -> Result<bool, DomainError>;
}
