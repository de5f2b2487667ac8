//! `PostgreSQL` implementation of the `SaveRepository` trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::warn;
use uuid::Uuid;

use codebound_core::error::DomainError;
use codebound_core::repository::{SaveRepository, StoredSave};

use crate::schema::CREATE_SAVES_TABLE;

fn db_error(err: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("database error: {err}"))
}

fn row_to_save(row: &PgRow) -> Result<StoredSave, sqlx::Error> {
    Ok(StoredSave {
        save_id: row.try_get("save_id")?,
        user_id: row.try_get("user_id")?,
        save_name: row.try_get("save_name")?,
        save_date: row.try_get("save_date")?,
        payload: row.try_get("payload")?,
    })
}

/// PostgreSQL-backed save repository.
#[derive(Debug, Clone)]
pub struct PgSaveRepository {
    pool: PgPool,
}

impl PgSaveRepository {
    /// Creates a new `PgSaveRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `saves` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(CREATE_SAVES_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&e))?;
        Ok(())
    }
}

#[async_trait]
impl SaveRepository for PgSaveRepository {
    async fn insert_save(&self, save: StoredSave) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO saves (save_id, user_id, save_name, save_date, payload) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(save.save_id)
        .bind(&save.user_id)
        .bind(&save.save_name)
        .bind(save.save_date)
        .bind(&save.payload)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(&e))?;
        Ok(())
    }

    async fn find_save(
        &self,
        save_id: Uuid,
        user_id: &str,
    ) -> Result<Option<StoredSave>, DomainError> {
        let row = sqlx::query(
            "SELECT save_id, user_id, save_name, save_date, payload \
             FROM saves WHERE save_id = $1 AND user_id = $2",
        )
        .bind(save_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&e))?;

        row.as_ref()
            .map(row_to_save)
            .transpose()
            .map_err(|e| db_error(&e))
    }

    async fn list_saves(&self, user_id: &str) -> Result<Vec<StoredSave>, DomainError> {
        let rows = sqlx::query(
            "SELECT save_id, user_id, save_name, save_date, payload \
             FROM saves WHERE user_id = $1 ORDER BY save_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&e))?;

        Ok(rows
            .iter()
            .filter_map(|row| match row_to_save(row) {
                Ok(save) => Some(save),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable save row");
                    None
                }
            })
            .collect())
    }

    async fn delete_save(&self, save_id: Uuid, user_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM saves WHERE save_id = $1 AND user_id = $2")
            .bind(save_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&e))?;
        Ok(result.rows_affected() > 0)
    }
}
