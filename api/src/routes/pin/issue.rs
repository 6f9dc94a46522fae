use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mp_shared::types::ResultEnvelope;
use mp_shared::utils::validation::mask_email;

use crate::app::AppState;
use crate::dto::IssuePinRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};

/// Handler for POST /api/v1/receiving-email
///
/// Generates a pin for the user and mails it to the given address. Any pin
/// issued earlier is replaced.
///
/// # Request Body
///
/// ```json
/// {
///     "user_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
///     "email": "user@example.com"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "error": "", "value": null }
/// ```
///
/// ## Errors
/// - 400 for a malformed address
/// - 503 when the mail could not be delivered
pub async fn receive_email(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<IssuePinRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_error_response(&req, &errors);
    }

    log::info!(
        "Issuing pin for user {} to {}",
        request.user_id,
        mask_email(&request.email)
    );

    match state
        .verification_service
        .issue_pin(request.user_id, &request.email)
        .await
    {
        Ok(result) => {
            log::info!(
                "Pin issued for user {}, message_id: {}",
                request.user_id,
                result.message_id
            );
            HttpResponse::Ok().json(ResultEnvelope::empty())
        }
        Err(error) => domain_error_response(&req, &error),
    }
}
