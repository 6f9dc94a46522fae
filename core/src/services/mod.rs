//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    DefaultEmailValidator, EmailNotifier, EmailValidator, IssuePinResult, PinHasher,
    UserLocks, VerificationService, VerificationServiceConfig, VerificationStores,
    VerifyPinResult,
};
