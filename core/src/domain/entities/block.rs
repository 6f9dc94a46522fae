//! Temporary lockout entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lockout of a user after the attempt threshold was exceeded
///
/// The record outlives the lockout itself: it is interpreted as expired once
/// the block duration has elapsed and removed by the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub user_id: Uuid,
    pub blocked_at: DateTime<Utc>,
}

impl BlockRecord {
    pub fn new(user_id: Uuid, blocked_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            blocked_at,
        }
    }

    /// The block holds while less than `duration` has elapsed
    pub fn is_active(&self, now: DateTime<Utc>, duration: Duration) -> bool {
        is_block_active(self.blocked_at, now, duration)
    }
}

/// Shared rule for stores that only hand out the timestamp
pub fn is_block_active(blocked_at: DateTime<Utc>, now: DateTime<Utc>, duration: Duration) -> bool {
    now - blocked_at < duration
}
