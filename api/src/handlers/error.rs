//! Translation of domain failures into HTTP responses
//!
//! Every failure leaves the API as a [`ResultEnvelope`] whose `error` text
//! names the route, the status code and the underlying message. Failures are
//! logged here and nowhere else on the way out.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse};
use validator::ValidationErrors;

use mp_core::errors::DomainError;
use mp_shared::types::ResultEnvelope;

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } | DomainError::NotFound { .. } => StatusCode::BAD_REQUEST,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        DomainError::Blocked | DomainError::Expired | DomainError::InvalidPin => {
            StatusCode::UNAUTHORIZED
        }
        DomainError::Delivery { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Infrastructure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Route pattern the request matched, or its raw path
fn route_path(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| req.path().to_string())
}

fn fail(req: &HttpRequest, status: StatusCode, message: impl std::fmt::Display) -> HttpResponse {
    let envelope: ResultEnvelope<()> =
        ResultEnvelope::http_fail(&route_path(req), status.as_u16(), message);
    HttpResponse::build(status).json(envelope)
}

/// Build the failure response for a domain error
pub fn domain_error_response(req: &HttpRequest, error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status.is_server_error() {
        log::error!("{} {} failed [{}]: {}", req.method(), req.path(), error.code(), error);
    } else {
        log::warn!("{} {} rejected [{}]: {}", req.method(), req.path(), error.code(), error);
    }

    let mut response = fail(req, status, error);
    if let DomainError::RateLimited { remaining_seconds } = error {
        if let Ok(value) = header::HeaderValue::from_str(&(*remaining_seconds).max(0).to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
    }
    response
}

/// Build the failure response for a request body that failed validation
pub fn validation_error_response(req: &HttpRequest, errors: &ValidationErrors) -> HttpResponse {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    messages.sort();

    let error = DomainError::Validation {
        message: messages.join(", "),
    };
    domain_error_response(req, &error)
}

/// JSON extractor error handler
///
/// Bodies that cannot be parsed into the request type get the same envelope
/// and a 400 instead of actix's plain-text default.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("{} {} malformed body: {}", req.method(), req.path(), err);
    let response = fail(req, StatusCode::BAD_REQUEST, format!("Invalid request body: {}", err));
    InternalError::from_response(err, response).into()
}
