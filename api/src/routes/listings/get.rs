use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::handlers::error_response;
use crate::middleware::AuthContext;
use crate::routes::AppState;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;

/// Handler for GET /api/v1/listings/{id}
pub async fn get_listing<U, L, B, R, O, P>(
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
    match state.listing_service.get_listing(path.into_inner()).await {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(error) => error_response(&error),
    }
}

/// Handler for GET /api/v1/listings
pub async fn list_listings<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    B: BookingRepository + 'static,
    R: ReviewRepository + 'static,
    O: OutboxRepository + 'static,
    P: PaymentGateway + 'static,
{
    match state.listing_service.list_listings().await {
        Ok(listings) => HttpResponse::Ok().json(listings),
        Err(error) => error_response(&error),
    }
}

/// Handler for GET /api/v1/listings/mine (requires auth)
pub async fn my_listings<U, L, B, R, O, P>(
    state: web::Data<AppState<U, L, B, R, O, P>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    B: BookingRepository + 'static,
    R: ReviewRepository + 'static,
    O: OutboxRepository + 'static,
    P: PaymentGateway + 'static,
{
    match state.listing_service.list_host_listings(auth.user_id).await {
        Ok(listings) => HttpResponse::Ok().json(listings),
        Err(error) => error_response(&error),
    }
}
