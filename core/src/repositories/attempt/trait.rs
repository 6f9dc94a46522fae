//! Attempt store trait for the failed-verification counter.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;

/// Store holding at most one attempt counter per user
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Check whether the user has an attempt counter
    async fn exists(&self, user_id: Uuid) -> DomainResult<bool>;

    /// Create the counter at 0
    ///
    /// # Returns
    /// * `Ok(())` - Counter created
    /// * `Err(DomainError::Conflict)` - The user already has a counter
    async fn initialize(&self, user_id: Uuid) -> DomainResult<()>;

    /// Add one to the counter
    ///
    /// Fails with `NotFound` when the counter does not exist.
    async fn increment(&self, user_id: Uuid) -> DomainResult<()>;

    /// Current value of the counter
    ///
    /// Fails with `NotFound` when the counter does not exist.
    async fn count(&self, user_id: Uuid) -> DomainResult<u32>;

    /// Remove the counter
    ///
    /// Fails with `NotFound` when the counter does not exist.
    async fn delete(&self, user_id: Uuid) -> DomainResult<()>;
}
