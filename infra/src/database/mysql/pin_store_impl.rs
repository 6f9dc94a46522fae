//! MySQL implementation of the PinStore trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::sync::Arc;
use uuid::Uuid;

use mp_core::domain::clock::Clock;
use mp_core::domain::entities::PinRecord;
use mp_core::errors::{DomainError, DomainResult};
use mp_core::repositories::PinStore;

use super::{insert_error, query_error, require_row};

const RESOURCE: &str = "pin";

/// MySQL implementation of PinStore over the `pins` table
pub struct MySqlPinStore {
    /// Database connection pool
    pool: MySqlPool,
    /// Source of `sent_at`
    clock: Arc<dyn Clock>,
}

impl MySqlPinStore {
    pub fn new(pool: MySqlPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl PinStore for MySqlPinStore {
    async fn create(&self, user_id: Uuid, pin_hash: &str) -> DomainResult<()> {
        sqlx::query("INSERT INTO pins (user_id, pin_hash, sent_at) VALUES (?, ?, ?)")
            .bind(user_id.to_string())
            .bind(pin_hash)
            .bind(self.clock.now())
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, RESOURCE, user_id))?;
        Ok(())
    }

    async fn exists(&self, user_id: Uuid) -> DomainResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM pins WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to check pin existence", e))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| query_error("Failed to read pin count", e))?;
        Ok(total > 0)
    }

    async fn read(&self, user_id: Uuid) -> DomainResult<PinRecord> {
        let row = sqlx::query("SELECT pin_hash, sent_at FROM pins WHERE user_id = ? LIMIT 1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to read pin", e))?
            .ok_or_else(|| DomainError::not_found(RESOURCE, user_id))?;

        let pin_hash: String = row
            .try_get("pin_hash")
            .map_err(|e| query_error("Failed to get pin_hash", e))?;
        let sent_at: DateTime<Utc> = row
            .try_get("sent_at")
            .map_err(|e| query_error("Failed to get sent_at", e))?;

        Ok(PinRecord::new(user_id, pin_hash, sent_at))
    }

    async fn update_hash(&self, user_id: Uuid, pin_hash: &str) -> DomainResult<()> {
        let result = sqlx::query("UPDATE pins SET pin_hash = ? WHERE user_id = ?")
            .bind(pin_hash)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to update pin hash", e))?;

        require_row(result.rows_affected(), RESOURCE, user_id)
    }

    async fn touch_sent_at(&self, user_id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("UPDATE pins SET sent_at = ? WHERE user_id = ?")
            .bind(self.clock.now())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to refresh pin timestamp", e))?;

        require_row(result.rows_affected(), RESOURCE, user_id)
    }

    async fn delete(&self, user_id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM pins WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete pin", e))?;

        require_row(result.rows_affected(), RESOURCE, user_id)
    }
}
