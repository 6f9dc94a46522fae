//! Pin verification policy configuration

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Length of an issued pin
pub const DEFAULT_PIN_LENGTH: usize = 6;

/// Age after which an issued pin is no longer accepted (2 hours)
pub const DEFAULT_PIN_EXPIRY_SECONDS: i64 = 2 * 60 * 60;

/// Lockout duration once the attempt threshold is exceeded (2 minutes)
pub const DEFAULT_BLOCK_DURATION_SECONDS: i64 = 2 * 60;

/// Minimum wait between two deliveries of a pin
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: i64 = 60;

/// A user is blocked once more than this many failed verifications are recorded
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Work factor of the pin hash
pub const DEFAULT_PIN_HASH_COST: u32 = 12;

/// Longest accepted expiry, block or cooldown window (30 days)
pub const MAX_WINDOW_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Verification workflow configuration
///
/// Every time window and threshold used by the workflow lives here so that
/// nothing is embedded as a literal in the business logic.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Seconds after which a pin expires
    #[serde(default = "default_pin_expiry_seconds")]
    pub pin_expiry_seconds: i64,

    /// Seconds a block stays active
    #[serde(default = "default_block_duration_seconds")]
    pub block_duration_seconds: i64,

    /// Seconds a user must wait between resends
    #[serde(default = "default_resend_cooldown_seconds")]
    pub resend_cooldown_seconds: i64,

    /// Number of failed verifications that must be exceeded before a block is created
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Number of digits in an issued pin
    #[serde(default = "default_pin_length")]
    pub pin_length: usize,

    /// Upper bound for a single email delivery, in seconds
    #[serde(default = "default_delivery_timeout_seconds")]
    pub delivery_timeout_seconds: u64,

    /// Extra tries for idempotent store reads failing with an infrastructure error
    #[serde(default = "default_read_retry_attempts")]
    pub read_retry_attempts: u32,

    /// Drop a leftover attempt counter when an expired block is lifted
    #[serde(default = "default_reset_attempts_on_unblock")]
    pub reset_attempts_on_unblock: bool,

    /// Work factor used when hashing pins
    #[serde(default = "default_pin_hash_cost")]
    pub pin_hash_cost: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            pin_expiry_seconds: DEFAULT_PIN_EXPIRY_SECONDS,
            block_duration_seconds: DEFAULT_BLOCK_DURATION_SECONDS,
            resend_cooldown_seconds: DEFAULT_RESEND_COOLDOWN_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            pin_length: DEFAULT_PIN_LENGTH,
            delivery_timeout_seconds: default_delivery_timeout_seconds(),
            read_retry_attempts: default_read_retry_attempts(),
            reset_attempts_on_unblock: default_reset_attempts_on_unblock(),
            pin_hash_cost: DEFAULT_PIN_HASH_COST,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    ///
    /// Reads `PIN_EXPIRY_SECONDS`, `PIN_BLOCK_DURATION_SECONDS`,
    /// `PIN_RESEND_COOLDOWN_SECONDS`, `PIN_MAX_ATTEMPTS`, `PIN_LENGTH`,
    /// `PIN_DELIVERY_TIMEOUT_SECONDS`, `PIN_READ_RETRY_ATTEMPTS`,
    /// `PIN_RESET_ATTEMPTS_ON_UNBLOCK` and `PIN_HASH_COST`. Unset, unparsable
    /// or out-of-range values fall back to the defaults; time windows must lie
    /// in `1..=MAX_WINDOW_SECONDS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            pin_expiry_seconds: env_in_range(
                "PIN_EXPIRY_SECONDS",
                defaults.pin_expiry_seconds,
                1..=MAX_WINDOW_SECONDS,
            ),
            block_duration_seconds: env_in_range(
                "PIN_BLOCK_DURATION_SECONDS",
                defaults.block_duration_seconds,
                1..=MAX_WINDOW_SECONDS,
            ),
            resend_cooldown_seconds: env_in_range(
                "PIN_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
                1..=MAX_WINDOW_SECONDS,
            ),
            max_attempts: env_in_range("PIN_MAX_ATTEMPTS", defaults.max_attempts, 1..=1000),
            pin_length: env_in_range("PIN_LENGTH", defaults.pin_length, 1..=18),
            delivery_timeout_seconds: env_in_range(
                "PIN_DELIVERY_TIMEOUT_SECONDS",
                defaults.delivery_timeout_seconds,
                1..=300,
            ),
            read_retry_attempts: env_in_range(
                "PIN_READ_RETRY_ATTEMPTS",
                defaults.read_retry_attempts,
                0..=10,
            ),
            reset_attempts_on_unblock: env_or(
                "PIN_RESET_ATTEMPTS_ON_UNBLOCK",
                defaults.reset_attempts_on_unblock,
            ),
            pin_hash_cost: env_in_range("PIN_HASH_COST", defaults.pin_hash_cost, 4..=31),
        }
    }

    /// Set the pin expiry window in seconds
    pub fn with_pin_expiry_seconds(mut self, seconds: i64) -> Self {
        self.pin_expiry_seconds = seconds;
        self
    }

    /// Set the block duration in seconds
    pub fn with_block_duration_seconds(mut self, seconds: i64) -> Self {
        self.block_duration_seconds = seconds;
        self
    }

    /// Set the resend cooldown in seconds
    pub fn with_resend_cooldown_seconds(mut self, seconds: i64) -> Self {
        self.resend_cooldown_seconds = seconds;
        self
    }

    /// Set the attempt threshold
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the delivery timeout in seconds
    pub fn with_delivery_timeout_seconds(mut self, seconds: u64) -> Self {
        self.delivery_timeout_seconds = seconds;
        self
    }

    /// Set how many extra tries idempotent reads get
    pub fn with_read_retry_attempts(mut self, attempts: u32) -> Self {
        self.read_retry_attempts = attempts;
        self
    }

    /// Set the pin hash work factor
    pub fn with_pin_hash_cost(mut self, cost: u32) -> Self {
        self.pin_hash_cost = cost;
        self
    }

    /// Choose whether lifting an expired block also clears the attempt counter
    pub fn with_reset_attempts_on_unblock(mut self, reset: bool) -> Self {
        self.reset_attempts_on_unblock = reset;
        self
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_in_range<T: FromStr + PartialOrd>(key: &str, default: T, range: RangeInclusive<T>) -> T {
    parse_in_range(std::env::var(key).ok().as_deref(), default, range)
}

fn parse_in_range<T: FromStr + PartialOrd>(
    value: Option<&str>,
    default: T,
    range: RangeInclusive<T>,
) -> T {
    value
        .and_then(|value| value.trim().parse().ok())
        .filter(|value| range.contains(value))
        .unwrap_or(default)
}

fn default_pin_expiry_seconds() -> i64 {
    DEFAULT_PIN_EXPIRY_SECONDS
}

fn default_block_duration_seconds() -> i64 {
    DEFAULT_BLOCK_DURATION_SECONDS
}

fn default_resend_cooldown_seconds() -> i64 {
    DEFAULT_RESEND_COOLDOWN_SECONDS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_pin_length() -> usize {
    DEFAULT_PIN_LENGTH
}

fn default_delivery_timeout_seconds() -> u64 {
    10
}

fn default_read_retry_attempts() -> u32 {
    2
}

fn default_reset_attempts_on_unblock() -> bool {
    true
}

fn default_pin_hash_cost() -> u32 {
    DEFAULT_PIN_HASH_COST
}
