use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for `POST /api/v1/receiving-email`
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct IssuePinRequest {
    pub user_id: Uuid,

    #[validate(length(
        min = 1,
        max = 254,
        message = "Email must be between 1 and 254 characters"
    ))]
    pub email: String,
}

/// Request body for `POST /api/v1/receiving-pin`
///
/// The pin is checked by the verification service after the block gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyPinRequest {
    pub user_id: Uuid,
    pub pin: String,
}

/// Request body for `POST /api/v1/resending-pin`
///
/// The address is checked by the verification service after the block gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResendPinRequest {
    pub user_id: Uuid,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_request_deserializes_wire_names() {
        let request: IssuePinRequest = serde_json::from_str(
            r#"{"user_id":"67e55044-10b1-426f-9247-bb680e5fe0c8","email":"user@example.com"}"#,
        )
        .unwrap();
        assert_eq!(request.email, "user@example.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_email_rejected_on_issue() {
        let request = IssuePinRequest {
            user_id: Uuid::new_v4(),
            email: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_empty_pin_still_deserializes() {
        let request: VerifyPinRequest = serde_json::from_str(
            r#"{"user_id":"67e55044-10b1-426f-9247-bb680e5fe0c8","pin":""}"#,
        )
        .unwrap();
        assert!(request.pin.is_empty());
    }

    #[test]
    fn test_malformed_user_id_does_not_deserialize() {
        let result: Result<VerifyPinRequest, _> =
            serde_json::from_str(r#"{"user_id":"not-a-uuid","pin":"123456"}"#);
        assert!(result.is_err());
    }
}
