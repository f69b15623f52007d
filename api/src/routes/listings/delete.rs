use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::handlers::error_response;
use crate::middleware::AuthContext;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for DELETE /api/v1/listings/{id} (requires auth, owner only)
pub async fn delete_listing<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    B: BookingRepository + 'static,
    R: ReviewRepository + 'static,
    O: OutboxRepository + 'static,
    P: PaymentGateway + 'static,
{
    match state
        .listing_service
        .delete_listing(path.into_inner(), auth.user_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Listing deleted successfully"
        })),
        Err(error) => error_response(&error),
    }
}
