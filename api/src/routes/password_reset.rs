use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use rr_core::services::lifecycle::{EmailServiceTrait, UserDirectoryTrait};
use rr_shared::utils::mask_email;

use crate::app::AppState;
use crate::dto::{ApplyNewPasswordRequest, RequestCodeRequest, VerifyCodeRequest};
use crate::handlers::{outcome_response, request_id, validation_response};

/// Handler for POST /api/v1/auth/password-reset/request
///
/// Emails a password reset code to the account address.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "jane@example.com"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Verification code sent to your email",
///     "timestamp": "2025-08-14T10:00:00Z",
///     "request_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 400 invalid email
/// - 429 a code was sent recently (`Retry-After` header set)
/// - 503 the email could not be delivered
pub async fn request_reset<E, D>(
    req: HttpRequest,
    state: web::Data<AppState<E, D>>,
    request: web::Json<RequestCodeRequest>,
) -> HttpResponse
where
    E: EmailServiceTrait + 'static,
    D: UserDirectoryTrait + 'static,
{
    let request_id = request_id(&req);

    if let Err(errors) = request.validate() {
        return validation_response(&errors, request_id);
    }

    tracing::info!(
        request_id = %request_id,
        email = %mask_email(&request.email),
        "Processing password reset request"
    );

    let outcome = state.lifecycle.request_reset(&request.email).await;
    outcome_response(outcome, request_id)
}

/// Handler for POST /api/v1/auth/password-reset/verify
///
/// Checks a reset code without consuming it, so the client can move on to
/// the new password form. A wrong code counts toward the lockout.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "jane@example.com",
///     "code": "482913"
/// }
/// ```
///
/// ## Errors
/// - 400 malformed input, or the code is invalid or expired
/// - 429 too many failed attempts (`Retry-After` header set)
pub async fn verify_reset_code<E, D>(
    req: HttpRequest,
    state: web::Data<AppState<E, D>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    E: EmailServiceTrait + 'static,
    D: UserDirectoryTrait + 'static,
{
    let request_id = request_id(&req);

    if let Err(errors) = request.validate() {
        return validation_response(&errors, request_id);
    }

    tracing::info!(
        request_id = %request_id,
        email = %mask_email(&request.email),
        "Processing reset code check"
    );

    let outcome = state
        .lifecycle
        .verify_reset_code(&request.email, &request.code)
        .await;
    outcome_response(outcome, request_id)
}

/// Handler for POST /api/v1/auth/password-reset/apply
///
/// Consumes the reset code and stores the new password.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "jane@example.com",
///     "code": "482913",
///     "new_password": "correct horse battery"
/// }
/// ```
///
/// ## Errors
/// - 400 malformed input, short password, or invalid or expired code
/// - 404 no account for the email
/// - 429 too many failed attempts
/// - 502 the user directory rejected the update
pub async fn apply_new_password<E, D>(
    req: HttpRequest,
    state: web::Data<AppState<E, D>>,
    request: web::Json<ApplyNewPasswordRequest>,
) -> HttpResponse
where
    E: EmailServiceTrait + 'static,
    D: UserDirectoryTrait + 'static,
{
    let request_id = request_id(&req);

    if let Err(errors) = request.validate() {
        return validation_response(&errors, request_id);
    }

    tracing::info!(
        request_id = %request_id,
        email = %mask_email(&request.email),
        "Processing new password"
    );

    let outcome = state
        .lifecycle
        .apply_new_password(&request.email, &request.code, &request.new_password)
        .await;
    outcome_response(outcome, request_id)
}
