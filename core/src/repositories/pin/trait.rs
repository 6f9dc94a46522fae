//! Pin store trait defining the interface for pin persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::PinRecord;
use crate::errors::DomainResult;

/// Store holding at most one pin record per user
///
/// Timestamps are assigned by the store from its clock; callers never supply
/// them.
///
/// # Errors
/// Every operation reports storage failures as `DomainError::Infrastructure`.
#[async_trait]
pub trait PinStore: Send + Sync {
    /// Create the pin record of a user with `sent_at` set to now
    ///
    /// # Returns
    /// * `Ok(())` - Record created
    /// * `Err(DomainError::Conflict)` - The user already has a pin
    async fn create(&self, user_id: Uuid, pin_hash: &str) -> DomainResult<()>;

    /// Check whether the user has a pin
    async fn exists(&self, user_id: Uuid) -> DomainResult<bool>;

    /// Read the pin record of a user
    ///
    /// # Returns
    /// * `Ok(PinRecord)` - The stored record
    /// * `Err(DomainError::NotFound)` - The user has no pin
    async fn read(&self, user_id: Uuid) -> DomainResult<PinRecord>;

    /// Replace the stored hash, leaving `sent_at` untouched
    ///
    /// Fails with `NotFound` when the user has no pin.
    async fn update_hash(&self, user_id: Uuid, pin_hash: &str) -> DomainResult<()>;

    /// Set `sent_at` to now
    ///
    /// Fails with `NotFound` when the user has no pin.
    async fn touch_sent_at(&self, user_id: Uuid) -> DomainResult<()>;

    /// Remove the pin of a user
    ///
    /// Fails with `NotFound` when the user has no pin.
    async fn delete(&self, user_id: Uuid) -> DomainResult<()>;
}
