//! HTTP route handlers, one module per resource.

pub mod auth;
pub mod bookings;
pub mod listings;
pub mod reviews;

use std::sync::Arc;

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::availability::AvailabilityService;
use se_core::services::auth::AuthService;
use se_core::services::booking::BookingService;
use se_core::services::listing::ListingService;
use se_core::services::payment::PaymentGateway;
use se_core::services::review::ReviewService;
use se_core::services::search::SearchService;

/// Application state holding the shared services.
///
/// Generic over the repository and gateway implementations so the same
/// wiring serves production (MySQL + Stripe) and tests (in-memory mocks).
pub struct AppState<U, L, B, R, O, P>
where
    U: UserRepository,
    L: ListingRepository,
    B: BookingRepository,
    R: ReviewRepository,
    O: OutboxRepository,
    P: PaymentGateway,
{
    pub auth_service: Arc<AuthService<U, O>>,
    pub listing_service: Arc<ListingService<L>>,
    pub availability_service: Arc<AvailabilityService<L, B>>,
    pub booking_service: Arc<BookingService<L, B, U, P, O>>,
    pub search_service: Arc<SearchService<L, B>>,
    pub review_service: Arc<ReviewService<R, L>>,
}
