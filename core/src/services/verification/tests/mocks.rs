//! Mock implementations for testing verification service

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::clock::ManualClock;
use crate::domain::entities::PinRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    InMemoryAttemptStore, InMemoryBlockStore, InMemoryPinStore, PinStore,
};
use crate::services::verification::{
    EmailNotifier, PinHasher, VerificationService, VerificationServiceConfig, VerificationStores,
};

/// Reversible stand-in for a real hasher
pub struct MockPinHasher;

impl PinHasher for MockPinHasher {
    fn hash(&self, pin: &str) -> DomainResult<String> {
        Ok(format!("hashed:{}", pin))
    }

    fn compare(&self, hash: &str, pin: &str) -> DomainResult<bool> {
        Ok(hash == format!("hashed:{}", pin))
    }
}

// Mock email service for testing
pub struct MockEmailNotifier {
    pub sent_pins: Arc<Mutex<HashMap<String, Vec<String>>>>,
    pub should_fail: bool,
    pub delay: Option<Duration>,
}

impl MockEmailNotifier {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_pins: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
            delay: None,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(false)
        }
    }

    pub fn last_pin(&self, email: &str) -> Option<String> {
        self.sent_pins
            .lock()
            .unwrap()
            .get(email)
            .and_then(|pins| pins.last().cloned())
    }

    pub fn sent_count(&self, email: &str) -> usize {
        self.sent_pins
            .lock()
            .unwrap()
            .get(email)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl EmailNotifier for MockEmailNotifier {
    async fn send_pin(&self, email: &str, pin: &str) -> Result<String, String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail {
            return Err("SMTP relay refused connection".to_string());
        }
        self.sent_pins
            .lock()
            .unwrap()
            .entry(email.to_string())
            .or_default()
            .push(pin.to_string());
        Ok(format!("mock-msg-{}", Uuid::new_v4()))
    }
}

/// Pin store whose reads fail a fixed number of times before delegating
pub struct FlakyPinStore {
    inner: InMemoryPinStore,
    failures_left: AtomicU32,
    pub read_calls: AtomicU32,
}

impl FlakyPinStore {
    pub fn new(inner: InMemoryPinStore, failures: u32) -> Self {
        Self {
            inner,
            failures_left: AtomicU32::new(failures),
            read_calls: AtomicU32::new(0),
        }
    }

    fn maybe_fail(&self) -> DomainResult<()> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        let left = self.failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.failures_left.store(left - 1, Ordering::SeqCst);
            return Err(DomainError::infrastructure("Failed to read pin", "connection reset"));
        }
        Ok(())
    }
}

#[async_trait]
impl PinStore for FlakyPinStore {
    async fn create(&self, user_id: Uuid, pin_hash: &str) -> DomainResult<()> {
        self.inner.create(user_id, pin_hash).await
    }

    async fn exists(&self, user_id: Uuid) -> DomainResult<bool> {
        self.maybe_fail()?;
        self.inner.exists(user_id).await
    }

    async fn read(&self, user_id: Uuid) -> DomainResult<PinRecord> {
        self.maybe_fail()?;
        self.inner.read(user_id).await
    }

    async fn update_hash(&self, user_id: Uuid, pin_hash: &str) -> DomainResult<()> {
        self.inner.update_hash(user_id, pin_hash).await
    }

    async fn touch_sent_at(&self, user_id: Uuid) -> DomainResult<()> {
        self.inner.touch_sent_at(user_id).await
    }

    async fn delete(&self, user_id: Uuid) -> DomainResult<()> {
        self.inner.delete(user_id).await
    }
}

/// Service wired to in-memory stores sharing one manual clock
pub struct Harness {
    pub service: VerificationService,
    pub clock: ManualClock,
    pub pins: Arc<InMemoryPinStore>,
    pub attempts: Arc<InMemoryAttemptStore>,
    pub blocks: Arc<InMemoryBlockStore>,
    pub notifier: Arc<MockEmailNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(MockEmailNotifier::new(false), VerificationServiceConfig::default())
    }

    pub fn with(notifier: MockEmailNotifier, config: VerificationServiceConfig) -> Self {
        let clock = ManualClock::new(Utc::now());
        let shared_clock = Arc::new(clock.clone());

        let pins = Arc::new(InMemoryPinStore::with_clock(shared_clock.clone()));
        let attempts = Arc::new(InMemoryAttemptStore::with_clock(shared_clock.clone()));
        let blocks = Arc::new(InMemoryBlockStore::with_clock(shared_clock.clone()));
        let notifier = Arc::new(notifier);

        let stores = VerificationStores::new(pins.clone(), attempts.clone(), blocks.clone());
        let service = VerificationService::new(
            stores,
            Arc::new(MockPinHasher),
            notifier.clone(),
            config,
        )
        .with_clock(shared_clock);

        Self {
            service,
            clock,
            pins,
            attempts,
            blocks,
            notifier,
        }
    }

    /// A pin of the right length that is not the delivered one
    pub fn wrong_pin(&self, email: &str) -> String {
        let delivered = self.notifier.last_pin(email).unwrap_or_default();
        if delivered == "111111" {
            "222222".to_string()
        } else {
            "111111".to_string()
        }
    }
}
