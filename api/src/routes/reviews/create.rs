use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::review::{CreateReviewRequest, ReviewResponse};
use crate::handlers::{error_response, validation_error_response};
use crate::middleware::AuthContext;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;
use se_shared::types::response::ErrorResponse;

/// Handler for POST /api/v1/reviews (requires auth)
pub async fn create_review<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    auth: AuthContext,
    request: web::Json<CreateReviewRequest>,
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

    let item = match request.item_ref() {
        Some(item) => item,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "VALIDATION_ERROR",
                "item_type must be one of: listing, experience, service",
            ));
        }
    };

    match state
        .review_service
        .create_review(auth.user_id, item, request.rating, request.comment.clone())
        .await
    {
        Ok(review) => HttpResponse::Created().json(ReviewResponse { review }),
        Err(error) => error_response(&error),
    }
}
