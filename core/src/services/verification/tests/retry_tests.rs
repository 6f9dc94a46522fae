//! Bounded retry of idempotent reads

use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::clock::ManualClock;
use crate::errors::DomainError;
use crate::repositories::{InMemoryAttemptStore, InMemoryBlockStore, InMemoryPinStore};
use crate::services::verification::{
    VerificationService, VerificationServiceConfig, VerificationStores,
};

use super::mocks::{FlakyPinStore, MockEmailNotifier, MockPinHasher};

fn service_with(pins: Arc<FlakyPinStore>, config: VerificationServiceConfig) -> VerificationService {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let stores = VerificationStores::new(
        pins,
        Arc::new(InMemoryAttemptStore::with_clock(clock.clone())),
        Arc::new(InMemoryBlockStore::with_clock(clock.clone())),
    );
    VerificationService::new(
        stores,
        Arc::new(MockPinHasher),
        Arc::new(MockEmailNotifier::new(false)),
        config,
    )
    .with_clock(clock)
}

#[tokio::test(start_paused = true)]
async fn test_transient_read_failures_are_retried() {
    let pins = Arc::new(FlakyPinStore::new(InMemoryPinStore::new(), 2));
    let service = service_with(pins.clone(), VerificationServiceConfig::default());

    let result = service.verify_pin(Uuid::new_v4(), "123456").await;

    // Third read reaches the store, which has no pin
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
    assert_eq!(pins.read_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_retries_are_bounded() {
    let pins = Arc::new(FlakyPinStore::new(InMemoryPinStore::new(), 10));
    let service = service_with(
        pins.clone(),
        VerificationServiceConfig::default().with_read_retry_attempts(1),
    );

    let result = service.verify_pin(Uuid::new_v4(), "123456").await;

    assert!(matches!(result, Err(DomainError::Infrastructure { .. })));
    assert_eq!(pins.read_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_no_retry_when_disabled() {
    let pins = Arc::new(FlakyPinStore::new(InMemoryPinStore::new(), 1));
    let service = service_with(
        pins.clone(),
        VerificationServiceConfig::default().with_read_retry_attempts(0),
    );

    let result = service.issue_pin(Uuid::new_v4(), "user@example.com").await;

    assert!(matches!(result, Err(DomainError::Infrastructure { .. })));
    assert_eq!(pins.read_calls.load(Ordering::SeqCst), 1);
}
