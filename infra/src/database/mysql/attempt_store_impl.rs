//! MySQL implementation of the AttemptStore trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use std::sync::Arc;
use uuid::Uuid;

use mp_core::domain::clock::Clock;
use mp_core::errors::{DomainError, DomainResult};
use mp_core::repositories::AttemptStore;

use super::{insert_error, query_error, require_row};

const RESOURCE: &str = "attempt counter";

/// MySQL implementation of AttemptStore over the `attempts` table
pub struct MySqlAttemptStore {
    pool: MySqlPool,
    clock: Arc<dyn Clock>,
}

impl MySqlAttemptStore {
    pub fn new(pool: MySqlPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl AttemptStore for MySqlAttemptStore {
    async fn exists(&self, user_id: Uuid) -> DomainResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM attempts WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to check attempt counter", e))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| query_error("Failed to read attempt row count", e))?;
        Ok(total > 0)
    }

    async fn initialize(&self, user_id: Uuid) -> DomainResult<()> {
        sqlx::query("INSERT INTO attempts (user_id, attempts, created_at) VALUES (?, 0, ?)")
            .bind(user_id.to_string())
            .bind(self.clock.now())
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, RESOURCE, user_id))?;
        Ok(())
    }

    async fn increment(&self, user_id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("UPDATE attempts SET attempts = attempts + 1 WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to increment attempt counter", e))?;

        require_row(result.rows_affected(), RESOURCE, user_id)
    }

    async fn count(&self, user_id: Uuid) -> DomainResult<u32> {
        let row = sqlx::query("SELECT attempts FROM attempts WHERE user_id = ? LIMIT 1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to read attempt counter", e))?
            .ok_or_else(|| DomainError::not_found(RESOURCE, user_id))?;

        row.try_get("attempts")
            .map_err(|e| query_error("Failed to get attempts", e))
    }

    async fn delete(&self, user_id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM attempts WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete attempt counter", e))?;

        require_row(result.rows_affected(), RESOURCE, user_id)
    }
}
