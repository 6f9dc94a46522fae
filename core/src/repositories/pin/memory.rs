//! In-memory implementation of PinStore

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::clock::{system_clock, Clock};
use crate::domain::entities::PinRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::PinStore;

/// Pin store keeping records in a process-local map
///
/// Used by tests and by deployments that run without a database.
pub struct InMemoryPinStore {
    pins: Arc<RwLock<HashMap<Uuid, PinRecord>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPinStore {
    /// Create an empty store on the wall clock
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    /// Create an empty store stamping records with `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            pins: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Number of stored pins
    pub async fn len(&self) -> usize {
        self.pins.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryPinStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PinStore for InMemoryPinStore {
    async fn create(&self, user_id: Uuid, pin_hash: &str) -> DomainResult<()> {
        let mut pins = self.pins.write().await;

        if pins.contains_key(&user_id) {
            return Err(DomainError::conflict("pin", user_id));
        }

        pins.insert(
            user_id,
            PinRecord::new(user_id, pin_hash.to_string(), self.clock.now()),
        );
        Ok(())
    }

    async fn exists(&self, user_id: Uuid) -> DomainResult<bool> {
        Ok(self.pins.read().await.contains_key(&user_id))
    }

    async fn read(&self, user_id: Uuid) -> DomainResult<PinRecord> {
        self.pins
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("pin", user_id))
    }

    async fn update_hash(&self, user_id: Uuid, pin_hash: &str) -> DomainResult<()> {
        let mut pins = self.pins.write().await;
        let record = pins
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::not_found("pin", user_id))?;
        record.pin_hash = pin_hash.to_string();
        Ok(())
    }

    async fn touch_sent_at(&self, user_id: Uuid) -> DomainResult<()> {
        let mut pins = self.pins.write().await;
        let record = pins
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::not_found("pin", user_id))?;
        record.sent_at = self.clock.now();
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> DomainResult<()> {
        self.pins
            .write()
            .await
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("pin", user_id))
    }
}
