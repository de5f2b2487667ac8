//! Test repositories: fake `SaveRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use codebound_core::error::DomainError;
use codebound_core::repository::{SaveRepository, StoredSave};
use uuid::Uuid;

/// An in-memory save repository keyed by save id. Enforces ownership the
/// same way the durable stores do.
#[derive(Debug, Default)]
pub struct InMemorySaveRepository {
    saves: Mutex<HashMap<Uuid, StoredSave>>,
}

impl InMemorySaveRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly, bypassing the manager. Useful for seeding
    /// records with hand-crafted (including corrupt) payloads.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed(&self, save: StoredSave) {
        self.saves.lock().unwrap().insert(save.save_id, save);
    }

    /// Total records held, across all owners.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    /// Whether no records are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SaveRepository for InMemorySaveRepository {
    async fn insert_save(&self, save: StoredSave) -> Result<(), DomainError> {
        self.saves.lock().unwrap().insert(save.save_id, save);
        Ok(())
    }

    async fn find_save(
        &self,
        save_id: Uuid,
        user_id: &str,
    ) -> Result<Option<StoredSave>, DomainError> {
        Ok(self
            .saves
            .lock()
            .unwrap()
            .get(&save_id)
            .filter(|save| save.user_id == user_id)
            .cloned())
    }

    async fn list_saves(&self, user_id: &str) -> Result<Vec<StoredSave>, DomainError> {
        Ok(self
            .saves
            .lock()
            .unwrap()
            .values()
            .filter(|save| save.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_save(&self, save_id: Uuid, user_id: &str) -> Result<bool, DomainError> {
        let mut saves = self.saves.lock().unwrap();
        let owned = saves
            .get(&save_id)
            .is_some_and(|save| save.user_id == user_id);
        if owned {
            saves.remove(&save_id);
        }
        Ok(owned)
    }
}

/// A save repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingSaveRepository;

#[async_trait]
impl SaveRepository for FailingSaveRepository {
    async fn insert_save(&self, _save: StoredSave) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_save(
        &self,
        _save_id: Uuid,
        _user_id: &str,
    ) -> Result<Option<StoredSave>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list_saves(&self, _user_id: &str) -> Result<Vec<StoredSave>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete_save(&self, _save_id: Uuid, _user_id: &str) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
