//! Standardized HTTP responses
//!
//! | Outcome                       | Status |
//! |-------------------------------|--------|
//! | success                       | 200    |
//! | validation, invalid code      | 400    |
//! | user not found                | 404    |
//! | throttled, locked out         | 429    |
//! | directory failure             | 502    |
//! | delivery failure, at capacity | 503    |

use actix_web::http::{header, StatusCode};
use actix_web::{error, web, HttpMessage, HttpRequest, HttpResponse};
use tracing_actix_web::RequestId;
use validator::ValidationErrors;

use rr_core::errors::OtpErrorCode;
use rr_core::services::lifecycle::ActionOutcome;
use rr_shared::types::ApiResponse;

/// Request id assigned by the tracing middleware, or a fresh one
pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|id| id.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// HTTP status for a failure category
pub fn status_for(code: OtpErrorCode) -> StatusCode {
    match code {
        OtpErrorCode::ValidationFailed | OtpErrorCode::InvalidOrExpired => StatusCode::BAD_REQUEST,
        OtpErrorCode::UserNotFound => StatusCode::NOT_FOUND,
        OtpErrorCode::Throttled | OtpErrorCode::LockedOut => StatusCode::TOO_MANY_REQUESTS,
        OtpErrorCode::DirectoryFailed => StatusCode::BAD_GATEWAY,
        OtpErrorCode::DeliveryFailed | OtpErrorCode::AtCapacity => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Build the response for a lifecycle outcome
pub fn outcome_response(outcome: ActionOutcome, request_id: String) -> HttpResponse {
    if outcome.success {
        let body = ApiResponse::<()>::message(outcome.message.unwrap_or_default())
            .with_request_id(request_id);
        return HttpResponse::Ok().json(body);
    }

    let code = outcome.error_code.unwrap_or(OtpErrorCode::ValidationFailed);
    let mut body = ApiResponse::<()>::error(outcome.error.unwrap_or_default())
        .with_error_code(code.as_str())
        .with_request_id(request_id);

    let mut response = HttpResponse::build(status_for(code));
    if let Some(seconds) = outcome.retry_after_seconds {
        body = body.with_retry_after(seconds);
        response.insert_header((header::RETRY_AFTER, seconds.to_string()));
    }

    response.json(body)
}

/// 400 response listing the first message of each invalid field
pub fn validation_response(errors: &ValidationErrors, request_id: String) -> HttpResponse {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            errors.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();

    tracing::debug!(request_id = %request_id, errors = ?messages, "Request validation failed");

    HttpResponse::BadRequest().json(
        ApiResponse::<()>::error(messages.join("; "))
            .with_error_code(OtpErrorCode::ValidationFailed.as_str())
            .with_request_id(request_id),
    )
}

/// JSON extractor configuration answering malformed bodies in the API format
pub fn json_config(max_payload_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(|err, _req| {
            let body = ApiResponse::<()>::error(format!("Invalid request body: {}", err))
                .with_error_code(OtpErrorCode::ValidationFailed.as_str());
            error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}
