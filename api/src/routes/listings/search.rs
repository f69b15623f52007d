use actix_web::{web, HttpResponse};

use crate::dto::listing::SearchQuery;
use crate::handlers::error_response;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;
use se_core::services::search::SearchFilters;

/// Handler for GET /api/v1/listings/search
///
/// Absent query parameters are no-ops; listings with a blocking booking
/// overlapping the requested dates are excluded.
pub async fn search_listings<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    query: web::Query<SearchQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    B: BookingRepository + 'static,
    R: ReviewRepository + 'static,
    O: OutboxRepository + 'static,
    P: PaymentGateway + 'static,
{
    let query = query.into_inner();
    let filters = SearchFilters {
        city: query.location,
        guests: query.guests,
        check_in: query.check_in,
        check_out: query.check_out,
    };

    match state.search_service.search(filters).await {
        Ok(listings) => HttpResponse::Ok().json(serde_json::json!({
            "count": listings.len(),
            "listings": listings,
        })),
        Err(error) => error_response(&error),
    }
}
