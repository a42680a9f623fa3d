//! CORS middleware configuration for cross-origin requests.
//!
//! Browser clients of the account pages call the API cross-origin. The
//! configuration comes from `CorsConfig`: `*` allows any origin, otherwise
//! only the listed origins are accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use rr_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        // Expose headers that clients might need to read
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("Configuring CORS to allow any origin");
        return cors.allow_any_origin();
    }

    tracing::info!(origins = ?config.allowed_origins, "Configuring CORS allow-list");
    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
