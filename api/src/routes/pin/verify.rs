use actix_web::{web, HttpRequest, HttpResponse};

use mp_shared::types::ResultEnvelope;

use crate::app::AppState;
use crate::dto::VerifyPinRequest;
use crate::handlers::error::domain_error_response;

/// Value returned once a pin was accepted
pub const CONFIRMED: &str = "confirmed";

/// Handler for POST /api/v1/receiving-pin
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "error": "", "value": "confirmed" }
/// ```
///
/// ## Errors
/// - 400 for a pin of the wrong length or when no pin was issued
/// - 401 when the user is blocked, the pin expired or it does not match
pub async fn receive_pin(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<VerifyPinRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    log::info!("Verifying pin for user {}", request.user_id);

    match state
        .verification_service
        .verify_pin(request.user_id, &request.pin)
        .await
    {
        Ok(result) => {
            log::info!(
                "Pin confirmed for user {} at {}",
                request.user_id,
                result.verified_at
            );
            HttpResponse::Ok().json(ResultEnvelope::success(CONFIRMED))
        }
        Err(error) => domain_error_response(&req, &error),
    }
}
