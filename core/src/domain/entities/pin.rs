//! Pin entity for email-based verification.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest pin that still fits the numeric range of a `u64`
const MAX_PIN_LENGTH: usize = 18;

/// The currently outstanding pin of a user
///
/// Only the one-way hash of the code is kept; the plaintext exists solely in
/// the email sent to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRecord {
    /// Owner of the pin
    pub user_id: Uuid,

    /// Salted one-way digest of the pin
    pub pin_hash: String,

    /// When the pin was last sent to the user
    pub sent_at: DateTime<Utc>,
}

impl PinRecord {
    pub fn new(user_id: Uuid, pin_hash: String, sent_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            pin_hash,
            sent_at,
        }
    }

    /// Time elapsed since the pin was sent
    pub fn elapsed_since_sent(&self, now: DateTime<Utc>) -> Duration {
        now - self.sent_at
    }

    /// A pin is expired once strictly more than `window` has elapsed
    pub fn is_expired(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.elapsed_since_sent(now) > window
    }

    /// Whole seconds left before another pin may be sent, `None` once the cooldown is over
    ///
    /// The remaining time is rounded down: 42.7s elapsed of a 60s cooldown
    /// leaves 17 seconds.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, cooldown: Duration) -> Option<i64> {
        let elapsed = self.elapsed_since_sent(now);
        if elapsed >= cooldown {
            return None;
        }
        let remaining_ms = (cooldown - elapsed).num_milliseconds();
        Some(remaining_ms.div_euclid(1000))
    }
}

/// Generate a uniformly random numeric pin of `length` digits
///
/// The first digit is never zero, so a 6-digit pin is always in
/// `100000..=999999`. Lengths are clamped to `1..=18`.
pub fn generate_pin(length: usize) -> String {
    let length = length.clamp(1, MAX_PIN_LENGTH) as u32;
    let low = if length == 1 { 0 } else { 10u64.pow(length - 1) };
    let high = 10u64.pow(length);
    OsRng.gen_range(low..high).to_string()
}
