//! In-memory implementation of BlockStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::clock::{system_clock, Clock};
use crate::domain::entities::BlockRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::BlockStore;

pub struct InMemoryBlockStore {
    blocks: Arc<RwLock<HashMap<Uuid, BlockRecord>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryBlockStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            blocks: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

impl Default for InMemoryBlockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockStore for InMemoryBlockStore {
    async fn create(&self, user_id: Uuid) -> DomainResult<()> {
        let mut blocks = self.blocks.write().await;

        if blocks.contains_key(&user_id) {
            return Err(DomainError::conflict("block", user_id));
        }

        blocks.insert(user_id, BlockRecord::new(user_id, self.clock.now()));
        Ok(())
    }

    async fn exists(&self, user_id: Uuid) -> DomainResult<bool> {
        Ok(self.blocks.read().await.contains_key(&user_id))
    }

    async fn blocked_at(&self, user_id: Uuid) -> DomainResult<DateTime<Utc>> {
        self.blocks
            .read()
            .await
            .get(&user_id)
            .map(|record| record.blocked_at)
            .ok_or_else(|| DomainError::not_found("block", user_id))
    }

    async fn delete(&self, user_id: Uuid) -> DomainResult<()> {
        self.blocks
            .write()
            .await
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("block", user_id))
    }
}
