//! MySQL implementation of the BlockStore trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::sync::Arc;
use uuid::Uuid;

use mp_core::domain::clock::Clock;
use mp_core::errors::{DomainError, DomainResult};
use mp_core::repositories::BlockStore;

use super::{insert_error, query_error, require_row};

const RESOURCE: &str = "block";

/// MySQL implementation of BlockStore over the `blocks` table
pub struct MySqlBlockStore {
    pool: MySqlPool,
    clock: Arc<dyn Clock>,
}

impl MySqlBlockStore {
    pub fn new(pool: MySqlPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl BlockStore for MySqlBlockStore {
    async fn create(&self, user_id: Uuid) -> DomainResult<()> {
        sqlx::query("INSERT INTO blocks (user_id, blocked_at) VALUES (?, ?)")
            .bind(user_id.to_string())
            .bind(self.clock.now())
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, RESOURCE, user_id))?;
        Ok(())
    }

    async fn exists(&self, user_id: Uuid) -> DomainResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM blocks WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to check block", e))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| query_error("Failed to read block row count", e))?;
        Ok(total > 0)
    }

    async fn blocked_at(&self, user_id: Uuid) -> DomainResult<DateTime<Utc>> {
        let row = sqlx::query("SELECT blocked_at FROM blocks WHERE user_id = ? LIMIT 1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to read block", e))?
            .ok_or_else(|| DomainError::not_found(RESOURCE, user_id))?;

        row.try_get("blocked_at")
            .map_err(|e| query_error("Failed to get blocked_at", e))
    }

    async fn delete(&self, user_id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM blocks WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete block", e))?;

        require_row(result.rows_affected(), RESOURCE, user_id)
    }
}
