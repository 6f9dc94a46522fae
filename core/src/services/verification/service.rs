//! Main verification service implementation

use chrono::Duration;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use mp_shared::utils::validation::mask_email;

use crate::domain::clock::{system_clock, Clock};
use crate::domain::entities::{failures_exceed, generate_pin, BlockRecord, PinRecord};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AttemptStore, BlockStore, PinStore};

use super::locks::UserLocks;
use super::traits::{DefaultEmailValidator, EmailNotifier, EmailValidator, PinHasher};
use super::types::{IssuePinResult, VerifyPinResult};
use super::VerificationServiceConfig;

/// Base delay between retries of an idempotent read
const READ_RETRY_BACKOFF: std::time::Duration = std::time::Duration::from_millis(50);

/// The three stores making up one user's verification session
#[derive(Clone)]
pub struct VerificationStores {
    pub pins: Arc<dyn PinStore>,
    pub attempts: Arc<dyn AttemptStore>,
    pub blocks: Arc<dyn BlockStore>,
}

impl VerificationStores {
    pub fn new(
        pins: Arc<dyn PinStore>,
        attempts: Arc<dyn AttemptStore>,
        blocks: Arc<dyn BlockStore>,
    ) -> Self {
        Self {
            pins,
            attempts,
            blocks,
        }
    }
}

/// Verification service for handling email pins
///
/// Every public operation runs under the user's lock from [`UserLocks`], so
/// the pin, attempt and block records of a user are only ever changed by one
/// operation at a time.
pub struct VerificationService {
    /// Pin, attempt and block stores
    stores: VerificationStores,
    /// Pin hashing
    hasher: Arc<dyn PinHasher>,
    /// Email delivery
    notifier: Arc<dyn EmailNotifier>,
    /// Email address check
    email_validator: Arc<dyn EmailValidator>,
    /// Time source for every elapsed-time comparison
    clock: Arc<dyn Clock>,
    /// Per-user serialization
    locks: UserLocks,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl VerificationService {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `stores` - Pin, attempt and block stores
    /// * `hasher` - Pin hashing implementation
    /// * `notifier` - Email delivery implementation
    /// * `config` - Time windows and thresholds
    pub fn new(
        stores: VerificationStores,
        hasher: Arc<dyn PinHasher>,
        notifier: Arc<dyn EmailNotifier>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            stores,
            hasher,
            notifier,
            email_validator: Arc::new(DefaultEmailValidator),
            clock: system_clock(),
            locks: UserLocks::new(),
            config,
        }
    }

    /// Replace the time source
    ///
    /// The stores should be built on the same clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the email address check
    pub fn with_email_validator(mut self, validator: Arc<dyn EmailValidator>) -> Self {
        self.email_validator = validator;
        self
    }

    /// Issue a new pin to a user
    ///
    /// This method:
    /// 1. Validates the email address
    /// 2. Generates and hashes a new pin
    /// 3. Sends the pin to the email address
    /// 4. Stores the hash once delivery succeeded, replacing any previous pin
    ///
    /// # Returns
    ///
    /// * `Ok(IssuePinResult)` - The pin was delivered and stored
    /// * `Err(DomainError::Validation)` - Malformed email
    /// * `Err(DomainError::Delivery)` - Sending failed; nothing was stored
    pub async fn issue_pin(&self, user_id: Uuid, email: &str) -> DomainResult<IssuePinResult> {
        self.validate_email(user_id, email)?;

        let _lock = self.locks.acquire(user_id).await;
        self.send_and_store(user_id, email).await
    }

    /// Send a fresh pin to a user who already has one
    ///
    /// Subject to the block gate and to the resend cooldown measured from the
    /// last delivery.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuePinResult)` - The new pin was delivered and stored
    /// * `Err(DomainError::Blocked)` - The user is locked out
    /// * `Err(DomainError::NotFound)` - No pin was issued before
    /// * `Err(DomainError::RateLimited)` - Cooldown not over, carries the wait in seconds
    pub async fn resend_pin(&self, user_id: Uuid, email: &str) -> DomainResult<IssuePinResult> {
        let _lock = self.locks.acquire(user_id).await;

        self.block_gate(user_id).await?;
        self.validate_email(user_id, email)?;

        let record = self.read_pin(user_id).await?;
        let cooldown = Duration::seconds(self.config.resend_cooldown_seconds);
        if let Some(remaining_seconds) = record.cooldown_remaining(self.clock.now(), cooldown) {
            tracing::warn!(
                user_id = %user_id,
                remaining_seconds = remaining_seconds,
                event = "rate_limit_exceeded",
                "Pin resend requested before cooldown elapsed"
            );
            return Err(DomainError::RateLimited { remaining_seconds });
        }

        self.send_and_store(user_id, email).await
    }

    /// Verify a pin supplied by a user
    ///
    /// An expired pin is deleted and, like a wrong pin, counts as a failed
    /// attempt. A correct pin ends the session: the pin and the attempt
    /// counter are removed.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyPinResult)` - The pin matched
    /// * `Err(DomainError::Blocked)` - The user is locked out
    /// * `Err(DomainError::Validation)` - Wrong pin length
    /// * `Err(DomainError::NotFound)` - No outstanding pin
    /// * `Err(DomainError::Expired)` - The pin is older than the expiry window
    /// * `Err(DomainError::InvalidPin)` - The pin does not match
    pub async fn verify_pin(&self, user_id: Uuid, pin: &str) -> DomainResult<VerifyPinResult> {
        let _lock = self.locks.acquire(user_id).await;

        self.block_gate(user_id).await?;

        if pin.chars().count() != self.config.pin_length {
            return Err(DomainError::Validation {
                message: format!("Pin must be exactly {} characters", self.config.pin_length),
            });
        }

        let record = self.read_pin(user_id).await?;
        let now = self.clock.now();

        if record.is_expired(now, Duration::seconds(self.config.pin_expiry_seconds)) {
            self.escalate_attempts(user_id).await?;
            self.stores.pins.delete(user_id).await?;
            tracing::info!(
                user_id = %user_id,
                event = "pin_expired",
                "Expired pin removed"
            );
            return Err(DomainError::Expired);
        }

        if !self.hasher.compare(&record.pin_hash, pin)? {
            self.escalate_attempts(user_id).await?;
            tracing::info!(
                user_id = %user_id,
                event = "pin_mismatch",
                "Pin verification failed"
            );
            return Err(DomainError::InvalidPin);
        }

        self.stores.pins.delete(user_id).await?;
        let has_attempts = self
            .read_with_retry("attempt_exists", user_id, || self.stores.attempts.exists(user_id))
            .await?;
        if has_attempts {
            self.stores.attempts.delete(user_id).await?;
        }

        tracing::info!(
            user_id = %user_id,
            event = "pin_verified",
            "Pin verified successfully"
        );

        Ok(VerifyPinResult { verified_at: now })
    }

    /// Record a failed verification and block the user past the threshold
    ///
    /// The first failure only creates the counter at 0, so a counter at `n`
    /// stands for `n + 1` failures. The block is created on the failure that
    /// takes that number above `max_attempts`.
    async fn escalate_attempts(&self, user_id: Uuid) -> DomainResult<()> {
        let attempts = &self.stores.attempts;

        let exists = self
            .read_with_retry("attempt_exists", user_id, || attempts.exists(user_id))
            .await?;
        if !exists {
            return attempts.initialize(user_id).await;
        }

        attempts.increment(user_id).await?;
        let count = self
            .read_with_retry("attempt_count", user_id, || attempts.count(user_id))
            .await?;

        if failures_exceed(count, self.config.max_attempts) {
            self.stores.blocks.create(user_id).await?;
            attempts.delete(user_id).await?;
            tracing::warn!(
                user_id = %user_id,
                attempts = count,
                block_seconds = self.config.block_duration_seconds,
                event = "user_blocked",
                "Too many failed verifications, user blocked"
            );
        } else {
            tracing::debug!(
                user_id = %user_id,
                attempts = count,
                "Failed verification recorded"
            );
        }

        Ok(())
    }

    /// Refuse a blocked user and lift blocks whose duration has passed
    async fn block_gate(&self, user_id: Uuid) -> DomainResult<()> {
        let blocks = &self.stores.blocks;

        let blocked = self
            .read_with_retry("block_exists", user_id, || blocks.exists(user_id))
            .await?;
        if !blocked {
            return Ok(());
        }

        let blocked_at = self
            .read_with_retry("block_read", user_id, || blocks.blocked_at(user_id))
            .await?;
        let block = BlockRecord::new(user_id, blocked_at);
        let duration = Duration::seconds(self.config.block_duration_seconds);

        if block.is_active(self.clock.now(), duration) {
            tracing::warn!(
                user_id = %user_id,
                blocked_at = %blocked_at,
                event = "blocked_request",
                "Request refused, user is blocked"
            );
            return Err(DomainError::Blocked);
        }

        blocks.delete(user_id).await?;

        if self.config.reset_attempts_on_unblock {
            let stale = self
                .read_with_retry("attempt_exists", user_id, || {
                    self.stores.attempts.exists(user_id)
                })
                .await?;
            if stale {
                self.stores.attempts.delete(user_id).await?;
            }
        }

        tracing::info!(
            user_id = %user_id,
            event = "block_lifted",
            "Expired block removed"
        );
        Ok(())
    }

    /// Generate, deliver, then persist a pin
    async fn send_and_store(&self, user_id: Uuid, email: &str) -> DomainResult<IssuePinResult> {
        let pin = generate_pin(self.config.pin_length);
        let pin_hash = self.hasher.hash(&pin)?;

        let message_id = self.deliver(user_id, email, &pin).await?;

        let sent_at = self.clock.now();
        self.store_pin(user_id, &pin_hash).await?;

        tracing::info!(
            user_id = %user_id,
            email = %mask_email(email),
            message_id = %message_id,
            event = "pin_issued",
            "Pin delivered and stored"
        );

        Ok(IssuePinResult {
            message_id,
            sent_at,
            next_resend_at: sent_at + Duration::seconds(self.config.resend_cooldown_seconds),
        })
    }

    /// Send a pin, bounded by the delivery timeout
    async fn deliver(&self, user_id: Uuid, email: &str, pin: &str) -> DomainResult<String> {
        let timeout = std::time::Duration::from_secs(self.config.delivery_timeout_seconds);

        let message = match tokio::time::timeout(timeout, self.notifier.send_pin(email, pin)).await
        {
            Ok(Ok(message_id)) => return Ok(message_id),
            Ok(Err(e)) => e,
            Err(_) => format!(
                "delivery timed out after {} seconds",
                self.config.delivery_timeout_seconds
            ),
        };

        tracing::error!(
            user_id = %user_id,
            email = %mask_email(email),
            error = %message,
            event = "pin_delivery_failed",
            "Failed to deliver pin"
        );
        Err(DomainError::Delivery { message })
    }

    /// Create the pin record or replace the hash and timestamp of the existing one
    async fn store_pin(&self, user_id: Uuid, pin_hash: &str) -> DomainResult<()> {
        let pins = &self.stores.pins;

        let exists = self
            .read_with_retry("pin_exists", user_id, || pins.exists(user_id))
            .await?;

        if exists {
            pins.update_hash(user_id, pin_hash).await?;
            pins.touch_sent_at(user_id).await
        } else {
            pins.create(user_id, pin_hash).await
        }
    }

    async fn read_pin(&self, user_id: Uuid) -> DomainResult<PinRecord> {
        self.read_with_retry("pin_read", user_id, || self.stores.pins.read(user_id))
            .await
    }

    fn validate_email(&self, user_id: Uuid, email: &str) -> DomainResult<()> {
        if email.trim().is_empty() || !self.email_validator.is_valid_email(email) {
            tracing::debug!(user_id = %user_id, "Rejected malformed email address");
            return Err(DomainError::Validation {
                message: "Invalid email address".to_string(),
            });
        }
        Ok(())
    }

    /// Run an idempotent read, retrying infrastructure failures a bounded number of times
    async fn read_with_retry<T, F, Fut>(
        &self,
        operation: &'static str,
        user_id: Uuid,
        mut read: F,
    ) -> DomainResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = DomainResult<T>>,
    {
        let mut retries = 0;
        loop {
            match read().await {
                Err(e) if e.is_retryable() && retries < self.config.read_retry_attempts => {
                    retries += 1;
                    tracing::warn!(
                        user_id = %user_id,
                        operation = operation,
                        retry = retries,
                        error = %e,
                        "Store read failed, retrying"
                    );
                    tokio::time::sleep(READ_RETRY_BACKOFF * retries).await;
                }
                result => return result,
            }
        }
    }
}
