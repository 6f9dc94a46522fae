//! Per-user lock registry
//!
//! Every workflow operation touches up to three records of one user with
//! independent store calls. Holding the user's lock for the whole operation
//! makes those calls a single unit with respect to other requests for the
//! same user, while requests for different users never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

type LockMap = HashMap<Uuid, Arc<AsyncMutex<()>>>;

/// Registry of one async mutex per user id
///
/// Entries exist only while some request holds or waits for the lock.
#[derive(Clone, Default)]
pub struct UserLocks {
    locks: Arc<Mutex<LockMap>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `user_id`
    pub async fn acquire(&self, user_id: Uuid) -> UserLockGuard {
        let entry = {
            let mut locks = self.lock_map();
            locks
                .entry(user_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = entry.clone().lock_owned().await;

        UserLockGuard {
            user_id,
            locks: self.locks.clone(),
            entry,
            guard: Some(guard),
        }
    }

    /// Number of users currently holding or waiting for a lock
    pub fn active_users(&self) -> usize {
        self.lock_map().len()
    }

    fn lock_map(&self) -> std::sync::MutexGuard<'_, LockMap> {
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Exclusive access to one user's records, released on drop
pub struct UserLockGuard {
    user_id: Uuid,
    locks: Arc<Mutex<LockMap>>,
    entry: Arc<AsyncMutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl UserLockGuard {
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        // The owned guard holds its own reference to the entry
        self.guard.take();

        let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // One reference in the map and one here: nobody else is waiting
        if Arc::strong_count(&self.entry) == 2 {
            locks.remove(&self.user_id);
        }
    }
}
