//! CORS middleware configuration for cross-origin requests.
//!
//! Browser clients post the verification forms from other origins. The
//! configuration is environment-aware: permissive while developing, limited
//! to configured origins in production.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

use mp_shared::config::Environment;

/// Creates a CORS middleware instance for the given environment.
///
/// # Environment Variables
/// - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
/// - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)
pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(3600);

    if environment.is_production() {
        create_production_cors(max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    log::debug!("Configuring permissive CORS");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(max_age)
}

/// Only origins listed in `ALLOWED_ORIGINS` are accepted.
fn create_production_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(max_age);

    if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
        for origin in allowed_origins.split(',').map(|s| s.trim()) {
            if !origin.is_empty() {
                log::info!("Adding allowed origin: {}", origin);
                cors = cors.allowed_origin(origin);
            }
        }
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_development_cors_echoes_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Development))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://forms.example.org"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert!(resp
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[actix_web::test]
    async fn test_production_cors_rejects_unlisted_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Production))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://unknown.invalid"))
            .to_request();
        if let Ok(resp) = test::try_call_service(&app, req).await {
            assert!(!resp
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        }
    }
}
