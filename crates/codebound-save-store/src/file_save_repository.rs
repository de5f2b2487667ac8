//! JSON-file implementation of the `SaveRepository` trait.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use codebound_core::error::DomainError;
use codebound_core::repository::{SaveRepository, StoredSave};

/// On-disk document. One per record, named `<save_id>.json`.
#[derive(Debug, Serialize, Deserialize)]
struct SaveDocument {
    save_id: Uuid,
    user_id: String,
    save_name: String,
    save_date: DateTime<Utc>,
    payload: serde_json::Value,
}

impl From<StoredSave> for SaveDocument {
    fn from(save: StoredSave) -> Self {
        Self {
            save_id: save.save_id,
            user_id: save.user_id,
            save_name: save.save_name,
            save_date: save.save_date,
            payload: save.payload,
        }
    }
}

impl From<SaveDocument> for StoredSave {
    fn from(doc: SaveDocument) -> Self {
        Self {
            save_id: doc.save_id,
            user_id: doc.user_id,
            save_name: doc.save_name,
            save_date: doc.save_date,
            payload: doc.payload,
        }
    }
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> DomainError {
    DomainError::Infrastructure(format!("failed to {action} {}: {err}", path.display()))
}

/// Directory-backed save repository.
#[derive(Debug, Clone)]
pub struct FileSaveRepository {
    dir: PathBuf,
}

impl FileSaveRepository {
    /// Opens a repository rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the directory cannot be
    /// created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error("create", &dir, &e))?;
        Ok(Self { dir })
    }

    /// The directory records are kept in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, save_id: Uuid) -> PathBuf {
        self.dir.join(format!("{save_id}.json"))
    }

    async fn read_document(&self, path: &Path) -> Result<Option<SaveDocument>, DomainError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read", path, &e)),
        };
        let doc = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::Infrastructure(format!("corrupt save {}: {e}", path.display()))
        })?;
        Ok(Some(doc))
    }
}

#[async_trait]
impl SaveRepository for FileSaveRepository {
    async fn insert_save(&self, save: StoredSave) -> Result<(), DomainError> {
        let path = self.path_for(save.save_id);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(&SaveDocument::from(save))?;

        fs::write(&tmp, bytes)
            .await
            .map_err(|e| io_error("write", &tmp, &e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_error("rename", &tmp, &e))?;

        debug!(path = %path.display(), "save written");
        Ok(())
    }

    async fn find_save(
        &self,
        save_id: Uuid,
        user_id: &str,
    ) -> Result<Option<StoredSave>, DomainError> {
        let doc = self.read_document(&self.path_for(save_id)).await?;
        Ok(doc
            .filter(|doc| doc.user_id == user_id && doc.save_id == save_id)
            .map(StoredSave::from))
    }

    async fn list_saves(&self, user_id: &str) -> Result<Vec<StoredSave>, DomainError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| io_error("list", &self.dir, &e))?;

        let mut saves = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error("list", &self.dir, &e))?
        {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match self.read_document(&path).await {
                Ok(Some(doc)) if doc.user_id == user_id => saves.push(doc.into()),
                Ok(_) => {}
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable save"),
            }
        }
        Ok(saves)
    }

    async fn delete_save(&self, save_id: Uuid, user_id: &str) -> Result<bool, DomainError> {
        if self.find_save(save_id, user_id).await?.is_none() {
            return Ok(false);
        }

        let path = self.path_for(save_id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("delete", &path, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    fn stored(user_id: &str, name: &str) -> StoredSave {
        StoredSave {
            save_id: Uuid::new_v4(),
            user_id: user_id.to_owned(),
            save_name: name.to_owned(),
            save_date: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            payload: serde_json::json!({"player": {"level": 2}, "current_stage": 3}),
        }
    }

    async fn repo() -> (TempDir, FileSaveRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::open(dir.path().join("saves")).await.unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn test_insert_then_find_returns_identical_record() {
        // Arrange
        let (_dir, repo) = repo().await;
        let save = stored("alice", "first");

        // Act
        repo.insert_save(save.clone()).await.unwrap();
        let found = repo.find_save(save.save_id, "alice").await.unwrap();

        // Assert
        assert_eq!(found, Some(save));
    }

    #[tokio::test]
    async fn test_find_for_other_user_returns_none() {
        let (_dir, repo) = repo().await;
        let save = stored("alice", "first");
        repo.insert_save(save.clone()).await.unwrap();

        let found = repo.find_save(save.save_id, "bob").await.unwrap();

        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let (_dir, repo) = repo().await;

        let found = repo.find_save(Uuid::new_v4(), "alice").await.unwrap();

        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_list_skips_corrupt_files_and_other_owners() {
        // Arrange
        let (_dir, repo) = repo().await;
        let mine = stored("alice", "mine");
        repo.insert_save(mine.clone()).await.unwrap();
        repo.insert_save(stored("bob", "theirs")).await.unwrap();
        fs::write(repo.dir().join(format!("{}.json", Uuid::new_v4())), b"{not json")
            .await
            .unwrap();
        fs::write(repo.dir().join("notes.txt"), b"ignored").await.unwrap();

        // Act
        let listed = repo.list_saves("alice").await.unwrap();

        // Assert
        assert_eq!(listed, vec![mine]);
    }

    #[tokio::test]
    async fn test_delete_checks_owner() {
        // Arrange
        let (_dir, repo) = repo().await;
        let save = stored("alice", "first");
        repo.insert_save(save.clone()).await.unwrap();

        // Act
        let by_bob = repo.delete_save(save.save_id, "bob").await.unwrap();
        let by_alice = repo.delete_save(save.save_id, "alice").await.unwrap();
        let again = repo.delete_save(save.save_id, "alice").await.unwrap();

        // Assert
        assert!(!by_bob);
        assert!(by_alice);
        assert!(!again);
        assert!(repo.list_saves("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_corrupt_record_is_an_infrastructure_error() {
        let (_dir, repo) = repo().await;
        let save_id = Uuid::new_v4();
        fs::write(repo.dir().join(format!("{save_id}.json")), b"[]")
            .await
            .unwrap();

        let result = repo.find_save(save_id, "alice").await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
