//! Types for verification service results

use chrono::{DateTime, Utc};

/// Result of issuing or resending a pin
#[derive(Debug, Clone)]
pub struct IssuePinResult {
    /// The message ID from the email provider
    pub message_id: String,
    /// When the pin was sent
    pub sent_at: DateTime<Utc>,
    /// When the user can request another pin
    pub next_resend_at: DateTime<Utc>,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyPinResult {
    pub verified_at: DateTime<Utc>,
}
