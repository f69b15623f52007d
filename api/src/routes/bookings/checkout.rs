use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::booking::{CheckoutResponse, CreateCheckoutRequest};
use crate::handlers::{error_response, validation_error_response};
use crate::middleware::AuthContext;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for POST /api/v1/bookings/checkout-session (requires auth)
///
/// Prices the stay, opens a hosted checkout session and persists a pending
/// booking holding the date range. Returns the redirect URL.
pub async fn create_checkout_session<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    auth: AuthContext,
    request: web::Json<CreateCheckoutRequest>,
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
        .booking_service
        .create_checkout_session(
            request.listing_id,
            request.check_in,
            request.check_out,
            request.guests,
            auth.user_id,
        )
        .await
    {
        Ok(redirect) => HttpResponse::Ok().json(CheckoutResponse {
            url: redirect.url,
            booking_id: redirect.booking_id,
        }),
        Err(error) => error_response(&error),
    }
}
