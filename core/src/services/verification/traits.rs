//! Traits for hashing, delivery and email validation collaborators

use async_trait::async_trait;

use crate::errors::DomainResult;

/// One-way salted hashing of pins
pub trait PinHasher: Send + Sync {
    /// Hash a plaintext pin
    fn hash(&self, pin: &str) -> DomainResult<String>;
    /// Compare a plaintext pin against a stored hash
    fn compare(&self, hash: &str, pin: &str) -> DomainResult<bool>;
}

/// Trait for email delivery integration
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    /// Send a pin to an email address, returning the provider's message id
    async fn send_pin(&self, email: &str, pin: &str) -> Result<String, String>;
}

/// Syntactic email address check
pub trait EmailValidator: Send + Sync {
    fn is_valid_email(&self, email: &str) -> bool;
}

/// Validator backed by the shared address rules
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEmailValidator;

impl EmailValidator for DefaultEmailValidator {
    fn is_valid_email(&self, email: &str) -> bool {
        mp_shared::utils::validation::is_valid_email(email)
    }
}
