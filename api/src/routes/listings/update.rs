use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::listing::UpdateListingRequest;
use crate::handlers::{error_response, validation_error_response};
use crate::middleware::AuthContext;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for PUT /api/v1/listings/{id} (requires auth, owner only)
pub async fn update_listing<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<UpdateListingRequest>,
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
        .update_listing(path.into_inner(), auth.user_id, request.0.into_update())
        .await
    {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(error) => error_response(&error),
    }
}
