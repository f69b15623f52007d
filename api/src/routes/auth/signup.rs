use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{SignupRequest, SignupResponse};
use crate::handlers::{error_response, validation_error_response};
use crate::routes::AppState;

use se_core::domain::entities::user::UserRole;
use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;
use se_shared::types::response::ErrorResponse;

/// Handler for POST /api/v1/auth/signup
///
/// Registers an account and emails a verification code. The account cannot
/// log in until the code is confirmed.
pub async fn signup<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    request: web::Json<SignupRequest>,
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

    let role = match UserRole::parse(&request.role) {
        Some(UserRole::Admin) | None => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "VALIDATION_ERROR",
                "role must be one of: guest, host, service_provider",
            ));
        }
        Some(role) => role,
    };

    match state
        .auth_service
        .signup(&request.name, &request.email, &request.password, role)
        .await
    {
        Ok(user) => HttpResponse::Created().json(SignupResponse {
            message: "Registration successful. Please check your email for the verification code."
                .to_string(),
            user_id: user.id.to_string(),
        }),
        Err(error) => error_response(&error),
    }
}
