use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::listing::CreateListingRequest;
use crate::handlers::{error_response, validation_error_response};
use crate::middleware::AuthContext;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for POST /api/v1/listings (requires auth)
pub async fn create_listing<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    auth: AuthContext,
    request: web::Json<CreateListingRequest>,
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
        .listing_service
        .create_listing(auth.user_id, request.0.into_draft())
        .await
    {
        Ok(listing) => HttpResponse::Created().json(listing),
        Err(error) => error_response(&error),
    }
}
