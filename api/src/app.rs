//! Application state and factory
//!
//! This module holds the shared application state and builds the Actix-web
//! application used by both the binary and the HTTP tests.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use mp_core::services::verification::VerificationService;
use mp_infra::database::DatabasePool;
use mp_shared::config::Environment;

use crate::handlers::error::json_error_handler;
use crate::middleware::cors::create_cors;
use crate::routes::pin;

/// Application state that holds shared services
pub struct AppState {
    pub verification_service: Arc<VerificationService>,
    /// Connection pool probed by `/health`, absent for in-memory storage
    pub database: Option<DatabasePool>,
}

impl AppState {
    pub fn new(verification_service: Arc<VerificationService>) -> Self {
        Self {
            verification_service,
            database: None,
        }
    }

    pub fn with_database(mut self, database: Option<DatabasePool>) -> Self {
        self.database = database;
        self
    }
}

/// Register the health check, the `/api/v1` routes and the JSON body handling
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .configure(pin::configure)
                .route("/", web::get().to(api_documentation)),
        );
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    environment: Environment,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(create_cors(environment))
        .configure(configure)
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Answers 503 when the database is configured but does not respond.
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (healthy, database) = match &state.database {
        None => (true, serde_json::json!({ "status": "in-memory" })),
        Some(pool) => match pool.health_check().await {
            Ok(_) => (
                true,
                serde_json::json!({
                    "status": "up",
                    "pool": pool.statistics().to_string(),
                }),
            ),
            Err(e) => {
                log::error!("Database health check failed: {}", e);
                (false, serde_json::json!({ "status": "down" }))
            }
        },
    };

    let status = if healthy { "healthy" } else { "unhealthy" };
    let body = serde_json::json!({
        "status": status,
        "service": "mailpin-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": database,
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "MailPin API v1",
        "endpoints": {
            "health": "/health",
            "receiving_email": {
                "path": "/api/v1/receiving-email",
                "method": "POST",
                "description": "Issue a pin and mail it to the user",
                "request_body": {
                    "user_id": "uuid",
                    "email": "string"
                },
                "responses": {
                    "200": "Pin sent",
                    "400": "Invalid email",
                    "503": "Email delivery failed"
                }
            },
            "receiving_pin": {
                "path": "/api/v1/receiving-pin",
                "method": "POST",
                "description": "Verify the pin the user received",
                "request_body": {
                    "user_id": "uuid",
                    "pin": "string (exactly 6 digits)"
                },
                "responses": {
                    "200": "Pin confirmed",
                    "400": "Wrong pin length or no pin issued",
                    "401": "User blocked, pin expired or pin incorrect"
                }
            },
            "resending_pin": {
                "path": "/api/v1/resending-pin",
                "method": "POST",
                "description": "Send a fresh pin to the user",
                "request_body": {
                    "user_id": "uuid",
                    "email": "string"
                },
                "responses": {
                    "200": "Pin sent",
                    "400": "Invalid email or no pin issued",
                    "401": "User blocked",
                    "429": "Resend cooldown running",
                    "503": "Email delivery failed"
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
