//! Verification service module for email pin verification
//!
//! This module provides the complete pin workflow:
//! - Pin issuance and resend with a cooldown
//! - Pin verification against a salted hash with an expiry window
//! - Failed-attempt escalation into a temporary block
//! - Per-user serialization of every operation

mod locks;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use locks::{UserLockGuard, UserLocks};
pub use mp_shared::config::VerificationConfig as VerificationServiceConfig;
pub use service::{VerificationService, VerificationStores};
pub use traits::{DefaultEmailValidator, EmailNotifier, EmailValidator, PinHasher};
pub use types::{IssuePinResult, VerifyPinResult};
