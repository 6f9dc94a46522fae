use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use mp_api::app::{create_app, AppState};
use mp_api::logging;
use mp_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Initialize logger
    let log_file = logging::init(&config.logging).context("failed to initialize logging")?;
    if let Some(path) = log_file {
        info!("Writing logs to {}", path.display());
    }

    info!("Starting MailPin API Server ({:?})", config.environment);

    let infrastructure = mp_infra::initialize(&config)
        .await
        .context("failed to initialize infrastructure")?;
    let service = Arc::new(infrastructure.verification_service(config.verification.clone()));
    let state = web::Data::new(
        AppState::new(service).with_database(infrastructure.database.clone()),
    );

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let environment = config.environment;
    let mut server = HttpServer::new(move || create_app(state.clone(), environment));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(database) = infrastructure.database {
        database.close().await;
    }

    Ok(())
}
