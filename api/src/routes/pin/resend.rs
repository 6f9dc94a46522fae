use actix_web::{web, HttpRequest, HttpResponse};

use mp_shared::types::ResultEnvelope;
use mp_shared::utils::validation::mask_email;

use crate::app::AppState;
use crate::dto::ResendPinRequest;
use crate::handlers::error::domain_error_response;

/// Handler for POST /api/v1/resending-pin
///
/// Replaces the user's outstanding pin with a fresh one. Refused with 429
/// and a `Retry-After` header while the resend cooldown is running, and with
/// 401 while the user is blocked.
pub async fn resend_pin(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<ResendPinRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    log::info!(
        "Resending pin for user {} to {}",
        request.user_id,
        mask_email(&request.email)
    );

    match state
        .verification_service
        .resend_pin(request.user_id, &request.email)
        .await
    {
        Ok(result) => {
            log::debug!(
                "Pin resent for user {}, next resend at {}",
                request.user_id,
                result.next_resend_at
            );
            HttpResponse::Ok().json(ResultEnvelope::empty())
        }
        Err(error) => domain_error_response(&req, &error),
    }
}
