use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use rr_core::services::lifecycle::{EmailServiceTrait, UserDirectoryTrait};
use rr_shared::utils::mask_email;

use crate::app::AppState;
use crate::dto::{RequestCodeRequest, VerifyCodeRequest};
use crate::handlers::{outcome_response, request_id, validation_response};

/// Handler for POST /api/v1/auth/email-verification/request
pub async fn request_verification<E, D>(
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
        "Processing email verification request"
    );

    let outcome = state
        .lifecycle
        .request_email_verification(&request.email)
        .await;
    outcome_response(outcome, request_id)
}

/// Handler for POST /api/v1/auth/email-verification/confirm
///
/// Consumes the code and marks the account email as verified.
pub async fn confirm_verification<E, D>(
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
        "Processing email verification confirmation"
    );

    let outcome = state
        .lifecycle
        .confirm_email_verification(&request.email, &request.code)
        .await;
    outcome_response(outcome, request_id)
}
