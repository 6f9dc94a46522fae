//! Failed-attempt counter entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Failed verification counter of a user
///
/// Created at 0 on the first failure, so the count trails the number of
/// failures by one. Absence of the record means no failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub user_id: Uuid,
    pub attempts: u32,
    pub created_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// A freshly initialized counter
    pub fn new(user_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            attempts: 0,
            created_at,
        }
    }

    pub fn increment(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }
}

/// Whether a counter at `attempts` stands for more than `max_attempts` failures
pub fn failures_exceed(attempts: u32, max_attempts: u32) -> bool {
    attempts.saturating_add(1) > max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero_and_exceeds_after_threshold() {
        let mut record = AttemptRecord::new(Uuid::new_v4(), Utc::now());
        assert_eq!(record.attempts, 0);

        // Five failures: the creating one plus four increments
        for _ in 0..4 {
            record.increment();
        }
        assert!(!failures_exceed(record.attempts, 5));

        record.increment();
        assert!(failures_exceed(record.attempts, 5));
    }

    #[test]
    fn test_single_attempt_policy() {
        assert!(!failures_exceed(0, 1));
        assert!(failures_exceed(1, 1));
    }
}
