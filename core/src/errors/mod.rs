//! Domain-specific error types and error handling.

use thiserror::Error;


/// Errors produced by the verification workflow and the stores behind it
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed input, rejected before touching storage
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// An operation referenced a record that does not exist
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A record was created twice
    #[error("Resource already exists: {resource}")]
    Conflict { resource: String },

    /// Resend requested before the cooldown elapsed
    #[error("Please wait {remaining_seconds} seconds before requesting a new pin")]
    RateLimited { remaining_seconds: i64 },

    /// The user is under an active lockout
    #[error("User is blocked")]
    Blocked,

    /// The stored pin is older than the expiry window
    #[error("Pin has expired")]
    Expired,

    /// The supplied pin does not match the stored hash
    #[error("Pin is not correct")]
    InvalidPin,

    /// The pin could not be handed to the email provider
    #[error("Failed to deliver pin: {message}")]
    Delivery { message: String },

    /// Storage or other infrastructure failure
    #[error("Infrastructure error: {message}")]
    Infrastructure { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Build a `NotFound` error for a record kind and user
    pub fn not_found(resource: &str, user_id: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            resource: format!("{} for user {}", resource, user_id),
        }
    }

    /// Build a `Conflict` error for a record kind and user
    pub fn conflict(resource: &str, user_id: impl std::fmt::Display) -> Self {
        DomainError::Conflict {
            resource: format!("{} for user {}", resource, user_id),
        }
    }

    /// Wrap an infrastructure failure with context
    pub fn infrastructure(context: &str, cause: impl std::fmt::Display) -> Self {
        DomainError::Infrastructure {
            message: format!("{}: {}", context, cause),
        }
    }

    /// Stable machine-readable tag for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Conflict { .. } => "CONFLICT",
            DomainError::RateLimited { .. } => "RATE_LIMITED",
            DomainError::Blocked => "BLOCKED",
            DomainError::Expired => "PIN_EXPIRED",
            DomainError::InvalidPin => "INVALID_PIN",
            DomainError::Delivery { .. } => "DELIVERY_FAILED",
            DomainError::Infrastructure { .. } => "INFRASTRUCTURE_ERROR",
        }
    }

    /// Whether an idempotent read may be retried after this error
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Infrastructure { .. })
    }
}
