//! In-memory implementation of AttemptStore

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::clock::{system_clock, Clock};
use crate::domain::entities::AttemptRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::AttemptStore;

pub struct InMemoryAttemptStore {
    attempts: Arc<RwLock<HashMap<Uuid, AttemptRecord>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            attempts: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

impl Default for InMemoryAttemptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn exists(&self, user_id: Uuid) -> DomainResult<bool> {
        Ok(self.attempts.read().await.contains_key(&user_id))
    }

    async fn initialize(&self, user_id: Uuid) -> DomainResult<()> {
        let mut attempts = self.attempts.write().await;

        if attempts.contains_key(&user_id) {
            return Err(DomainError::conflict("attempt counter", user_id));
        }

        attempts.insert(user_id, AttemptRecord::new(user_id, self.clock.now()));
        Ok(())
    }

    async fn increment(&self, user_id: Uuid) -> DomainResult<()> {
        let mut attempts = self.attempts.write().await;
        attempts
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::not_found("attempt counter", user_id))?
            .increment();
        Ok(())
    }

    async fn count(&self, user_id: Uuid) -> DomainResult<u32> {
        self.attempts
            .read()
            .await
            .get(&user_id)
            .map(|record| record.attempts)
            .ok_or_else(|| DomainError::not_found("attempt counter", user_id))
    }

    async fn delete(&self, user_id: Uuid) -> DomainResult<()> {
        self.attempts
            .write()
            .await
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("attempt counter", user_id))
    }
}
