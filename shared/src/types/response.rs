//! API response envelope

use serde::{Deserialize, Serialize};

/// Envelope returned by every endpoint
///
/// A successful result carries an empty `error` and the operation's value;
/// a failed one carries the error text and a `null` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    /// Error message, empty on success
    pub error: String,

    /// Operation value, `null` on failure
    pub value: Option<T>,
}

impl<T> ResultEnvelope<T> {
    /// Create a successful envelope
    pub fn success(value: T) -> Self {
        Self {
            error: String::new(),
            value: Some(value),
        }
    }

    /// Create a failed envelope carrying only the error text
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            value: None,
        }
    }

    /// Create a failed envelope annotated with the request path and status code
    pub fn http_fail(path: &str, code: u16, message: impl std::fmt::Display) -> Self {
        Self::fail(format!(
            "error along the way: {}; with code: {}; message: {}",
            path, code, message
        ))
    }

    /// Check if the envelope represents success
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

impl ResultEnvelope<()> {
    /// Successful envelope for operations without a value (`value: null`)
    pub fn empty() -> Self {
        Self {
            error: String::new(),
            value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_has_empty_error() {
        let envelope = ResultEnvelope::success("confirmed");
        assert!(envelope.is_success());

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "", "value": "confirmed" }));
    }

    #[test]
    fn test_empty_envelope_serializes_null_value() {
        let json = serde_json::to_value(ResultEnvelope::empty()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "", "value": null }));
    }

    #[test]
    fn test_http_fail_message() {
        let envelope: ResultEnvelope<()> =
            ResultEnvelope::http_fail("/api/v1/receiving-pin", 401, "user is blocked");
        assert!(!envelope.is_success());
        assert_eq!(
            envelope.error,
            "error along the way: /api/v1/receiving-pin; with code: 401; message: user is blocked"
        );
        assert!(envelope.value.is_none());
    }
}
