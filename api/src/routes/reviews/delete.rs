use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::handlers::error_response;
use crate::middleware::AuthContext;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for DELETE /api/v1/reviews/{id} (requires auth)
///
/// Allowed for the review author and for the owner of the reviewed item.
pub async fn delete_review<U, L, B, R, O, P>(
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
        .review_service
        .delete_review(path.into_inner(), auth.user_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Review deleted successfully"
        })),
        Err(error) => error_response(&error),
    }
}
