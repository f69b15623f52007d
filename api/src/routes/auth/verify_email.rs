use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthResponse, VerifyEmailRequest};
use crate::handlers::{error_response, validation_error_response};
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for POST /api/v1/auth/verify-email
///
/// Confirms the emailed verification code and returns the first access token.
pub async fn verify_email<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    request: web::Json<VerifyEmailRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    B: BookingRepository + 'static,
    R: ReviewRepository + 'static,
    O: OutboxRepository + 'static,
    P: PaymentGateway + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .verify_email(&request.email, &request.otp)
        .await
    {
        Ok(tokens) => HttpResponse::Ok().json(AuthResponse {
            access_token: tokens.access_token,
            expires_in: tokens.expires_in,
            user: tokens.user,
        }),
        Err(error) => error_response(&error),
    }
}
