use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::booking::BookingResponse;
use crate::handlers::error_response;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for GET /api/v1/bookings/{id} (requires auth)
pub async fn get_booking<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
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
    match state.booking_service.get_booking(path.into_inner()).await {
        Ok(booking) => HttpResponse::Ok().json(BookingResponse { booking }),
        Err(error) => error_response(&error),
    }
}
