use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use tracing::info;

use rr_api::telemetry::init_tracing;
use rr_api::{create_app, AppState};
use rr_core::services::lifecycle::{LifecycleConfig, OtpLifecycleService};
use rr_core::services::otp::{OtpService, OtpServiceConfig, OtpSweeper};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = rr_infra::config::load_config()?;
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting RoomRent API Server");

    let otp_service = Arc::new(OtpService::new(OtpServiceConfig::from(&config.otp))?);
    let sweeper = Arc::new(OtpSweeper::new(
        otp_service.clone(),
        Duration::from_secs(config.otp.sweep_interval_seconds),
    ));
    let sweeper_handle = sweeper.start_background_task();

    let services = rr_infra::initialize(&config)?;
    let lifecycle = Arc::new(OtpLifecycleService::new(
        otp_service,
        services.email,
        services.directory,
        LifecycleConfig::from(&config.otp),
    ));
    let state = web::Data::new(AppState::new(lifecycle));

    let bind_address = config.server.bind_address();
    info!(bind_address = %bind_address, "Server will bind");

    let cors = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, max_payload_size))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(handle) = sweeper_handle {
        handle.abort();
    }
    info!("Server stopped");

    Ok(())
}
