//! Integration tests for the verification workflow through the public API

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use mp_core::domain::clock::ManualClock;
    use mp_core::errors::{DomainError, DomainResult};
    use mp_core::repositories::{
        AttemptStore, BlockStore, InMemoryAttemptStore, InMemoryBlockStore, InMemoryPinStore,
        PinStore,
    };
    use mp_core::services::verification::{
        EmailNotifier, PinHasher, VerificationService, VerificationServiceConfig,
        VerificationStores,
    };

    // Mock email service
    struct MockEmailNotifier {
        last_pin: Mutex<Option<String>>,
    }

    #[async_trait]
    impl EmailNotifier for MockEmailNotifier {
        async fn send_pin(&self, _email: &str, pin: &str) -> Result<String, String> {
            *self.last_pin.lock().unwrap() = Some(pin.to_string());
            Ok(format!("msg_id_{}", Utc::now().timestamp()))
        }
    }

    struct ReversedHasher;

    impl PinHasher for ReversedHasher {
        fn hash(&self, pin: &str) -> DomainResult<String> {
            Ok(pin.chars().rev().collect())
        }

        fn compare(&self, hash: &str, pin: &str) -> DomainResult<bool> {
            Ok(self.hash(pin)? == hash)
        }
    }

    struct Fixture {
        service: VerificationService,
        clock: ManualClock,
        notifier: Arc<MockEmailNotifier>,
        pins: Arc<InMemoryPinStore>,
        attempts: Arc<InMemoryAttemptStore>,
        blocks: Arc<InMemoryBlockStore>,
    }

    fn fixture() -> Fixture {
        let clock = ManualClock::new(Utc::now());
        let shared = Arc::new(clock.clone());
        let pins = Arc::new(InMemoryPinStore::with_clock(shared.clone()));
        let attempts = Arc::new(InMemoryAttemptStore::with_clock(shared.clone()));
        let blocks = Arc::new(InMemoryBlockStore::with_clock(shared.clone()));
        let notifier = Arc::new(MockEmailNotifier {
            last_pin: Mutex::new(None),
        });

        let service = VerificationService::new(
            VerificationStores::new(pins.clone(), attempts.clone(), blocks.clone()),
            Arc::new(ReversedHasher),
            notifier.clone(),
            VerificationServiceConfig::default(),
        )
        .with_clock(shared);

        Fixture {
            service,
            clock,
            notifier,
            pins,
            attempts,
            blocks,
        }
    }

    fn delivered(fixture: &Fixture) -> String {
        fixture.notifier.last_pin.lock().unwrap().clone().unwrap()
    }

    #[tokio::test]
    async fn test_complete_flow_with_lockout_and_recovery() {
        let fixture = fixture();
        let user_id = Uuid::new_v4();
        let email = "jane@example.org";

        // Step 1: Issue a pin
        fixture.service.issue_pin(user_id, email).await.unwrap();
        let pin = delivered(&fixture);
        let wrong = if pin == "999999" { "100000" } else { "999999" };

        // Step 2: Exhaust the attempts
        for _ in 0..6 {
            let result = fixture.service.verify_pin(user_id, wrong).await;
            assert!(matches!(result, Err(DomainError::InvalidPin)));
        }
        assert!(fixture.blocks.exists(user_id).await.unwrap());

        // Step 3: Even the right pin is refused while blocked
        let result = fixture.service.verify_pin(user_id, &pin).await;
        assert!(matches!(result, Err(DomainError::Blocked)));

        // Step 4: After the block, resend and verify the new pin
        fixture.clock.advance(Duration::minutes(3));
        fixture.service.resend_pin(user_id, email).await.unwrap();
        let fresh = delivered(&fixture);

        fixture.service.verify_pin(user_id, &fresh).await.unwrap();

        assert!(!fixture.pins.exists(user_id).await.unwrap());
        assert!(!fixture.attempts.exists(user_id).await.unwrap());
        assert!(!fixture.blocks.exists(user_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let fixture = fixture();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        fixture.service.issue_pin(alice, "alice@example.org").await.unwrap();
        let alice_pin = delivered(&fixture);
        fixture.service.issue_pin(bob, "bob@example.org").await.unwrap();

        fixture.blocks.create(bob).await.unwrap();

        assert!(fixture.service.verify_pin(alice, &alice_pin).await.is_ok());
        assert!(fixture.pins.exists(bob).await.unwrap());
    }
}
