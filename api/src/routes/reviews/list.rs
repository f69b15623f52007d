use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::review::ReviewListResponse;
use crate::handlers::error_response;
use crate::routes::AppState;

use se_core::domain::value_objects::ItemRef;
use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;
use se_shared::types::response::ErrorResponse;

/// Handler for GET /api/v1/reviews/{item_type}/{item_id}
pub async fn list_reviews<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    path: web::Path<(String, Uuid)>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    B: BookingRepository + 'static,
    R: ReviewRepository + 'static,
    O: OutboxRepository + 'static,
    P: PaymentGateway + 'static,
{
    let (item_type, item_id) = path.into_inner();
    let item = match ItemRef::from_parts(&item_type, item_id) {
        Some(item) => item,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "VALIDATION_ERROR",
                "item_type must be one of: listing, experience, service",
            ));
        }
    };

    match state.review_service.list_reviews(item).await {
        Ok(reviews) => HttpResponse::Ok().json(ReviewListResponse { reviews }),
        Err(error) => error_response(&error),
    }
}
