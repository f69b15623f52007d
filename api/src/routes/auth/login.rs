use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::{error_response, validation_error_response};
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for POST /api/v1/auth/login
pub async fn login<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    request: web::Json<LoginRequest>,
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
        .login(&request.email, &request.password)
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
