//! Mock email notifier for development and tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use mp_core::services::verification::EmailNotifier;
use mp_shared::utils::validation::mask_email;

/// A pin handed to the mock notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentPin {
    pub email: String,
    pub pin: String,
    pub message_id: String,
}

/// Email notifier that records pins instead of sending them
#[derive(Debug, Default)]
pub struct MockEmailNotifier {
    sent: Mutex<Vec<SentPin>>,
    simulate_failure: AtomicBool,
}

impl MockEmailNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier whose every send fails
    pub fn failing() -> Self {
        let notifier = Self::new();
        notifier.set_simulate_failure(true);
        notifier
    }

    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent().len()
    }

    /// Most recent pin sent to `email`
    pub fn last_pin_for(&self, email: &str) -> Option<String> {
        self.sent()
            .iter()
            .rev()
            .find(|sent| sent.email == email)
            .map(|sent| sent.pin.clone())
    }

    fn sent(&self) -> std::sync::MutexGuard<'_, Vec<SentPin>> {
        self.sent.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EmailNotifier for MockEmailNotifier {
    async fn send_pin(&self, email: &str, pin: &str) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err("Mock email delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        tracing::info!(
            email = %mask_email(email),
            pin = pin,
            message_id = %message_id,
            "[mock email] verification pin"
        );

        self.sent().push(SentPin {
            email: email.to_string(),
            pin: pin.to_string(),
            message_id: message_id.clone(),
        });
        Ok(message_id)
    }
}
