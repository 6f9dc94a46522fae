//! Attempt escalation and block gate behavior

use chrono::Duration;
use uuid::Uuid;

use crate::domain::clock::Clock;
use crate::errors::DomainError;
use crate::repositories::{AttemptStore, BlockStore, PinStore};
use crate::services::verification::VerificationServiceConfig;

use super::mocks::{Harness, MockEmailNotifier};

const EMAIL: &str = "user@example.com";

async fn issued(harness: &Harness, user_id: Uuid) -> String {
    harness.service.issue_pin(user_id, EMAIL).await.unwrap();
    harness.wrong_pin(EMAIL)
}

#[tokio::test]
async fn test_fewer_than_six_failures_count_from_zero() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    let wrong = issued(&harness, user_id).await;

    for failures in 1..=5u32 {
        let result = harness.service.verify_pin(user_id, &wrong).await;
        assert!(matches!(result, Err(DomainError::InvalidPin)));
        assert_eq!(harness.attempts.count(user_id).await.unwrap(), failures - 1);
    }
    assert!(!harness.blocks.exists(user_id).await.unwrap());
}

#[tokio::test]
async fn test_sixth_failure_blocks_and_clears_attempts() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    let wrong = issued(&harness, user_id).await;

    for _ in 0..5 {
        let _ = harness.service.verify_pin(user_id, &wrong).await;
    }
    assert!(!harness.blocks.exists(user_id).await.unwrap());

    // The sixth failure is still reported as a wrong pin
    let result = harness.service.verify_pin(user_id, &wrong).await;
    assert!(matches!(result, Err(DomainError::InvalidPin)));

    assert!(harness.blocks.exists(user_id).await.unwrap());
    assert_eq!(harness.blocks.blocked_at(user_id).await.unwrap(), harness.clock.now());
    assert!(!harness.attempts.exists(user_id).await.unwrap());
}

#[tokio::test]
async fn test_blocked_user_is_refused_and_block_persists() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    let pin = {
        harness.service.issue_pin(user_id, EMAIL).await.unwrap();
        harness.notifier.last_pin(EMAIL).unwrap()
    };
    harness.blocks.create(user_id).await.unwrap();
    let blocked_at = harness.blocks.blocked_at(user_id).await.unwrap();

    harness.clock.advance(Duration::seconds(30));

    let verify = harness.service.verify_pin(user_id, &pin).await;
    assert!(matches!(verify, Err(DomainError::Blocked)));

    harness.clock.advance(Duration::seconds(45));
    let resend = harness.service.resend_pin(user_id, EMAIL).await;
    assert!(matches!(resend, Err(DomainError::Blocked)));

    assert_eq!(harness.blocks.blocked_at(user_id).await.unwrap(), blocked_at);
    assert!(harness.pins.exists(user_id).await.unwrap());
    assert_eq!(harness.notifier.sent_count(EMAIL), 1);
}

#[tokio::test]
async fn test_blocked_check_precedes_pin_validation() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    harness.blocks.create(user_id).await.unwrap();

    let result = harness.service.verify_pin(user_id, "12").await;

    assert!(matches!(result, Err(DomainError::Blocked)));
}

#[tokio::test]
async fn test_expired_block_lifted_on_verify() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    harness.service.issue_pin(user_id, EMAIL).await.unwrap();
    let pin = harness.notifier.last_pin(EMAIL).unwrap();
    harness.blocks.create(user_id).await.unwrap();

    harness.clock.advance(Duration::minutes(3));

    assert!(harness.service.verify_pin(user_id, &pin).await.is_ok());
    assert!(!harness.blocks.exists(user_id).await.unwrap());
}

#[tokio::test]
async fn test_expired_block_lifted_on_resend() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    harness.service.issue_pin(user_id, EMAIL).await.unwrap();
    harness.blocks.create(user_id).await.unwrap();

    harness.clock.advance(Duration::minutes(3));

    assert!(harness.service.resend_pin(user_id, EMAIL).await.is_ok());
    assert!(!harness.blocks.exists(user_id).await.unwrap());
    assert_eq!(harness.notifier.sent_count(EMAIL), 2);
}

#[tokio::test]
async fn test_block_ends_exactly_at_duration() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    harness.service.issue_pin(user_id, EMAIL).await.unwrap();
    harness.blocks.create(user_id).await.unwrap();

    harness.clock.advance(Duration::minutes(2));
    let result = harness.service.verify_pin(user_id, &harness.wrong_pin(EMAIL)).await;

    assert!(matches!(result, Err(DomainError::InvalidPin)));
    assert!(!harness.blocks.exists(user_id).await.unwrap());
}

#[tokio::test]
async fn test_user_starts_over_after_served_block() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    let wrong = issued(&harness, user_id).await;

    for _ in 0..6 {
        let _ = harness.service.verify_pin(user_id, &wrong).await;
    }
    assert!(harness.blocks.exists(user_id).await.unwrap());

    harness.clock.advance(Duration::minutes(3));

    let result = harness.service.verify_pin(user_id, &wrong).await;
    assert!(matches!(result, Err(DomainError::InvalidPin)));
    assert_eq!(harness.attempts.count(user_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_stale_attempts_cleared_when_block_lifted() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    let wrong = issued(&harness, user_id).await;

    harness.blocks.create(user_id).await.unwrap();
    harness.attempts.initialize(user_id).await.unwrap();
    harness.attempts.increment(user_id).await.unwrap();
    harness.clock.advance(Duration::minutes(3));

    let _ = harness.service.verify_pin(user_id, &wrong).await;

    assert_eq!(harness.attempts.count(user_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_stale_attempts_kept_when_reset_disabled() {
    let harness = Harness::with(
        MockEmailNotifier::new(false),
        VerificationServiceConfig::default().with_reset_attempts_on_unblock(false),
    );
    let user_id = Uuid::new_v4();
    let wrong = issued(&harness, user_id).await;

    harness.blocks.create(user_id).await.unwrap();
    harness.attempts.initialize(user_id).await.unwrap();
    harness.attempts.increment(user_id).await.unwrap();
    harness.clock.advance(Duration::minutes(3));

    let _ = harness.service.verify_pin(user_id, &wrong).await;

    assert_eq!(harness.attempts.count(user_id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_expired_pins_count_toward_block() {
    let harness = Harness::with(
        MockEmailNotifier::new(false),
        VerificationServiceConfig::default().with_max_attempts(1),
    );
    let user_id = Uuid::new_v4();

    for round in 0..2 {
        harness.service.issue_pin(user_id, EMAIL).await.unwrap();
        let pin = harness.notifier.last_pin(EMAIL).unwrap();
        harness.clock.advance(Duration::hours(3));

        let result = harness.service.verify_pin(user_id, &pin).await;
        assert!(matches!(result, Err(DomainError::Expired)), "round {round}");
    }

    assert!(harness.blocks.exists(user_id).await.unwrap());
    assert!(!harness.attempts.exists(user_id).await.unwrap());
}

#[tokio::test]
async fn test_issue_is_not_gated_by_block() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    harness.blocks.create(user_id).await.unwrap();

    assert!(harness.service.issue_pin(user_id, EMAIL).await.is_ok());
    assert!(harness.blocks.exists(user_id).await.unwrap());
}
