//! Block store trait for temporary lockouts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::DomainResult;

/// Store holding at most one block per user
///
/// A block record says nothing about whether the lockout is still in force;
/// callers compare `blocked_at` against the block duration.
#[async_trait]
pub trait BlockStore: Send + Sync {
    /// Create a block with `blocked_at` set to now
    ///
    /// Fails with `Conflict` when the user is already blocked.
    async fn create(&self, user_id: Uuid) -> DomainResult<()>;

    /// Check whether a block record exists, regardless of its age
    async fn exists(&self, user_id: Uuid) -> DomainResult<bool>;

    /// When the block was created
    ///
    /// Fails with `NotFound` when there is no block.
    async fn blocked_at(&self, user_id: Uuid) -> DomainResult<DateTime<Utc>>;

    /// Remove the block
    ///
    /// Fails with `NotFound` when there is no block.
    async fn delete(&self, user_id: Uuid) -> DomainResult<()>;
}
