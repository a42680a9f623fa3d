//! Application state and factory
//!
//! This module holds the shared application state and provides the
//! factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error, HttpResponse};
use tracing_actix_web::TracingLogger;

use rr_core::services::lifecycle::{EmailServiceTrait, OtpLifecycleService, UserDirectoryTrait};
use rr_shared::config::CorsConfig;
use rr_shared::types::ApiResponse;

use crate::handlers::json_config;
use crate::middleware::cors::create_cors;
use crate::routes::{email_verification, password_reset};

/// Application state that holds shared services
pub struct AppState<E, D>
where
    E: EmailServiceTrait,
    D: UserDirectoryTrait,
{
    pub lifecycle: Arc<OtpLifecycleService<E, D>>,
}

impl<E, D> AppState<E, D>
where
    E: EmailServiceTrait,
    D: UserDirectoryTrait,
{
    pub fn new(lifecycle: Arc<OtpLifecycleService<E, D>>) -> Self {
        Self { lifecycle }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<E, D>(
    app_state: web::Data<AppState<E, D>>,
    cors: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    E: EmailServiceTrait + 'static,
    D: UserDirectoryTrait + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config(max_payload_size))
        // Logging wraps CORS so rejected preflights are still traced
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/auth")
                .service(
                    web::scope("/password-reset")
                        .route("/request", web::post().to(password_reset::request_reset::<E, D>))
                        .route("/verify", web::post().to(password_reset::verify_reset_code::<E, D>))
                        .route("/apply", web::post().to(password_reset::apply_new_password::<E, D>)),
                )
                .service(
                    web::scope("/email-verification")
                        .route(
                            "/request",
                            web::post().to(email_verification::request_verification::<E, D>),
                        )
                        .route(
                            "/confirm",
                            web::post().to(email_verification::confirm_verification::<E, D>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "roomrent-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(
        ApiResponse::<()>::error("The requested resource was not found")
            .with_error_code("NOT_FOUND"),
    )
}
