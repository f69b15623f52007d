use actix_web::{web, HttpResponse};

use crate::dto::booking::ReconcileResponse;
use crate::handlers::error_response;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for GET /api/v1/bookings/sessions/{session_id}/status
///
/// The success-page poll. Queries the payment provider for ground truth and
/// applies the pending-to-paid transition when the session is paid. Safe to
/// call repeatedly; re-reconciling a paid booking is a no-op.
pub async fn reconcile_session<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    B: BookingRepository + 'static,
    R: ReviewRepository + 'static,
    O: OutboxRepository + 'static,
    P: PaymentGateway + 'static,
{
    match state.booking_service.reconcile(&path.into_inner()).await {
        Ok(outcome) => HttpResponse::Ok().json(ReconcileResponse {
            status: outcome.payment_status,
            booking: outcome.booking,
        }),
        Err(error) => error_response(&error),
    }
}
