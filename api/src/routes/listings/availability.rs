use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::listing::{PeriodDto, UnavailablePeriodsResponse};
use crate::handlers::error_response;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for GET /api/v1/listings/{id}/unavailable-periods
///
/// Returns the merged calendar view of blocking bookings and host blackouts.
pub async fn unavailable_periods<U, L, B, R, O, P>(
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
    match state
        .availability_service
        .unavailable_periods(path.into_inner())
        .await
    {
        Ok(periods) => HttpResponse::Ok().json(UnavailablePeriodsResponse {
            periods: periods.into_iter().map(PeriodDto::from).collect(),
        }),
        Err(error) => error_response(&error),
    }
}
