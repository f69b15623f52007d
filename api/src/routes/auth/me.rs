use actix_web::{web, HttpResponse};

use crate::handlers::error_response;
use crate::middleware::AuthContext;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for GET /api/v1/auth/me (requires auth)
pub async fn me<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    B: BookingRepository + 'static,
    R: ReviewRepository + 'static,
    O: OutboxRepository + 'static,
    P: PaymentGateway + 'static,
{
    match state.auth_service.profile(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(error) => error_response(&error),
    }
}
