//! Checkout orchestration and reconciliation tests.

use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::domain::entities::listing::Listing;
use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::Location;
use crate::errors::DomainError;
use crate::repositories::{
    BookingRepository, ListingRepository, MockBookingRepository, MockListingRepository,
    MockOutboxRepository, MockUserRepository, UserRepository,
};
use crate::services::availability::AvailabilityService;
use crate::services::booking::config::BookingServiceConfig;
use crate::services::booking::service::BookingService;
use crate::services::payment::{MockPaymentGateway, PaymentGateway, PaymentSessionStatus};

type TestBookingService = BookingService<
    MockListingRepository,
    MockBookingRepository,
    MockUserRepository,
    MockPaymentGateway,
    MockOutboxRepository,
>;

struct Fixture {
    service: TestBookingService,
    listings: Arc<MockListingRepository>,
    bookings: Arc<MockBookingRepository>,
    gateway: Arc<MockPaymentGateway>,
    outbox: Arc<MockOutboxRepository>,
    listing: Listing,
    guest: User,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn fixture() -> Fixture {
    let listings = Arc::new(MockListingRepository::new());
    let bookings = Arc::new(MockBookingRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let gateway = Arc::new(MockPaymentGateway::new());
    let outbox = Arc::new(MockOutboxRepository::new());

    let mut listing = Listing::new(
        Uuid::new_v4(),
        "Harbour loft".to_string(),
        "Bright loft near the quay".to_string(),
        10_000,
        Location::new("1 Quay Rd", "Sydney", "Australia", -33.86, 151.21),
    );
    listing.cleaning_fee_cents = 5_000;
    listing.max_guests = 4;
    listings.insert(listing.clone()).await;

    let mut guest = User::new(
        "Ada".to_string(),
        "ada@example.com".to_string(),
        "$2b$12$hash".to_string(),
        UserRole::Guest,
        "123456".to_string(),
        10,
    );
    guest.verify();
    let guest = users.create(guest).await.unwrap();

    let availability = Arc::new(AvailabilityService::new(
        listings.clone(),
        bookings.clone(),
    ));
    let service = BookingService::new(
        listings.clone(),
        bookings.clone(),
        users.clone(),
        availability,
        gateway.clone(),
        outbox.clone(),
        BookingServiceConfig::default(),
    );

    Fixture {
        service,
        listings,
        bookings,
        gateway,
        outbox,
        listing,
        guest,
    }
}

#[tokio::test]
async fn test_checkout_creates_pending_booking_with_session() {
    let f = fixture().await;

    let redirect = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 4),
            2,
            f.guest.id,
        )
        .await
        .unwrap();

    assert!(redirect.url.starts_with("https://checkout.mock/pay/"));

    let booking = f.bookings.find_by_id(redirect.booking_id).await.unwrap().unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    // 3 nights at 10000 plus 5000 cleaning fee
    assert_eq!(booking.total_amount_cents, 35_000);
    assert!(!booking.checkout_session_id.is_empty());
    assert!(booking.hold_expires_at > Utc::now());
}

#[tokio::test]
async fn test_checkout_session_carries_audit_metadata() {
    let f = fixture().await;

    f.service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 4),
            2,
            f.guest.id,
        )
        .await
        .unwrap();

    let requests = f.gateway.requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.line_item.unit_amount_cents, 35_000);
    assert_eq!(request.line_item.name, "Harbour loft");
    assert!(request.success_url.contains("{CHECKOUT_SESSION_ID}"));
    assert!(request.cancel_url.contains(&f.listing.id.to_string()));
    assert_eq!(request.metadata["guests"], "2");
    assert_eq!(request.metadata["check_in"], "2026-01-01");
    assert_eq!(request.metadata["total_amount_cents"], "35000");
}

#[tokio::test]
async fn test_checkout_unknown_listing_is_not_found() {
    let f = fixture().await;
    let result = f
        .service
        .create_checkout_session(
            Uuid::new_v4(),
            date(2026, 1, 1),
            date(2026, 1, 4),
            2,
            f.guest.id,
        )
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_checkout_rejects_inverted_dates() {
    let f = fixture().await;
    let result = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 4),
            date(2026, 1, 1),
            2,
            f.guest.id,
        )
        .await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));

    let result = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 1),
            2,
            f.guest.id,
        )
        .await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_checkout_rejects_zero_guests() {
    let f = fixture().await;
    let result = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 4),
            0,
            f.guest.id,
        )
        .await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_checkout_blocked_by_paid_overlap() {
    let f = fixture().await;
    let mut paid = Booking::new(
        f.listing.id,
        f.listing.host_id,
        Uuid::new_v4(),
        date(2026, 3, 1),
        date(2026, 3, 5),
        2,
        45_000,
        "cs_existing".to_string(),
        Utc::now() + Duration::minutes(30),
    );
    paid.mark_paid();
    f.bookings.insert(paid).await;

    let result = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 3, 4),
            date(2026, 3, 6),
            2,
            f.guest.id,
        )
        .await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_checkout_blocked_by_live_pending_hold() {
    let f = fixture().await;

    // First guest opens checkout and holds the range
    f.service
        .create_checkout_session(
            f.listing.id,
            date(2026, 3, 1),
            date(2026, 3, 5),
            2,
            f.guest.id,
        )
        .await
        .unwrap();

    // Second guest cannot double-book while the hold is alive
    let result = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 3, 3),
            date(2026, 3, 7),
            2,
            Uuid::new_v4(),
        )
        .await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_checkout_allowed_after_hold_expires() {
    let f = fixture().await;
    let expired_hold = Booking::new(
        f.listing.id,
        f.listing.host_id,
        Uuid::new_v4(),
        date(2026, 3, 1),
        date(2026, 3, 5),
        2,
        45_000,
        "cs_abandoned".to_string(),
        Utc::now() - Duration::minutes(1),
    );
    f.bookings.insert(expired_hold).await;

    let result = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 3, 1),
            date(2026, 3, 5),
            2,
            f.guest.id,
        )
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_checkout_half_open_adjacency_allowed() {
    let f = fixture().await;
    let mut paid = Booking::new(
        f.listing.id,
        f.listing.host_id,
        Uuid::new_v4(),
        date(2026, 3, 1),
        date(2026, 3, 5),
        2,
        45_000,
        "cs_existing".to_string(),
        Utc::now() + Duration::minutes(30),
    );
    paid.mark_paid();
    f.bookings.insert(paid).await;

    // Checking in the day the previous guest checks out
    let result = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 3, 5),
            date(2026, 3, 8),
            2,
            f.guest.id,
        )
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_gateway_failure_persists_no_booking() {
    let f = fixture().await;
    f.gateway.fail_next_create().await;

    let result = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 4),
            2,
            f.guest.id,
        )
        .await;
    assert!(matches!(result, Err(DomainError::Upstream { .. })));

    // Range is still free: no pending booking was written
    let retry = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 4),
            2,
            f.guest.id,
        )
        .await;
    assert!(retry.is_ok());
}

#[tokio::test]
async fn test_reconcile_unpaid_session_changes_nothing() {
    let f = fixture().await;
    let redirect = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 4),
            2,
            f.guest.id,
        )
        .await
        .unwrap();
    let booking = f.bookings.find_by_id(redirect.booking_id).await.unwrap().unwrap();

    let outcome = f.service.reconcile(&booking.checkout_session_id).await.unwrap();
    assert_eq!(outcome.payment_status, PaymentSessionStatus::Unpaid);
    assert!(outcome.booking.is_none());

    let unchanged = f.bookings.find_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, BookingStatus::Pending);
    assert_eq!(f.outbox.enqueued().await, 0);
}

#[tokio::test]
async fn test_reconcile_promotes_to_paid_and_enqueues_confirmation() {
    let f = fixture().await;
    let redirect = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 4),
            2,
            f.guest.id,
        )
        .await
        .unwrap();
    let booking = f.bookings.find_by_id(redirect.booking_id).await.unwrap().unwrap();

    f.gateway.settle(&booking.checkout_session_id).await;
    let outcome = f.service.reconcile(&booking.checkout_session_id).await.unwrap();

    assert_eq!(outcome.payment_status, PaymentSessionStatus::Paid);
    let reconciled = outcome.booking.unwrap();
    assert_eq!(reconciled.status, BookingStatus::Paid);

    assert_eq!(f.outbox.enqueued().await, 1);
    let emails = f.outbox.all().await;
    assert_eq!(emails[0].recipient, f.guest.email);
    assert!(emails[0].subject.contains("Confirmed"));
}

#[tokio::test]
async fn test_reconcile_is_idempotent() {
    let f = fixture().await;
    let redirect = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 4),
            2,
            f.guest.id,
        )
        .await
        .unwrap();
    let booking = f.bookings.find_by_id(redirect.booking_id).await.unwrap().unwrap();
    f.gateway.settle(&booking.checkout_session_id).await;

    let first = f.service.reconcile(&booking.checkout_session_id).await.unwrap();
    let second = f.service.reconcile(&booking.checkout_session_id).await.unwrap();

    let first_booking = first.booking.unwrap();
    let second_booking = second.booking.unwrap();
    assert_eq!(first_booking.id, second_booking.id);
    assert_eq!(second_booking.status, BookingStatus::Paid);

    // Exactly one confirmation for the pair of polls
    assert_eq!(f.outbox.enqueued().await, 1);
}

#[tokio::test]
async fn test_reconcile_paid_session_without_booking_is_anomaly() {
    let f = fixture().await;

    // Session exists at the provider but nothing local references it
    let session = f
        .gateway
        .create_session(crate::services::payment::CreateSessionRequest {
            line_item: crate::services::payment::LineItem {
                name: "Harbour loft".to_string(),
                description: "orphan".to_string(),
                unit_amount_cents: 1_000,
                image: None,
            },
            success_url: "http://localhost/success".to_string(),
            cancel_url: "http://localhost/cancel".to_string(),
            metadata: Default::default(),
        })
        .await
        .unwrap();
    f.gateway.settle(&session.id).await;

    let outcome = f.service.reconcile(&session.id).await.unwrap();
    assert_eq!(outcome.payment_status, PaymentSessionStatus::Paid);
    assert!(outcome.booking.is_none());
    assert_eq!(f.outbox.enqueued().await, 0);
}

#[tokio::test]
async fn test_reconcile_unknown_session_is_upstream_error() {
    let f = fixture().await;
    let result = f.service.reconcile("cs_never_created").await;
    assert!(matches!(result, Err(DomainError::Upstream { .. })));
}

#[tokio::test]
async fn test_get_booking() {
    let f = fixture().await;
    let redirect = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 4),
            2,
            f.guest.id,
        )
        .await
        .unwrap();

    let booking = f.service.get_booking(redirect.booking_id).await.unwrap();
    assert_eq!(booking.id, redirect.booking_id);

    let missing = f.service.get_booking(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_amount_fixed_at_session_creation() {
    let f = fixture().await;
    let redirect = f
        .service
        .create_checkout_session(
            f.listing.id,
            date(2026, 1, 1),
            date(2026, 1, 4),
            2,
            f.guest.id,
        )
        .await
        .unwrap();

    // Host raises the price after the session was created
    let mut repriced = f.listing.clone();
    repriced.price_per_night_cents = 99_999;
    f.listings.update(repriced).await.unwrap();

    let booking = f.bookings.find_by_id(redirect.booking_id).await.unwrap().unwrap();
    f.gateway.settle(&booking.checkout_session_id).await;
    let outcome = f.service.reconcile(&booking.checkout_session_id).await.unwrap();

    // The booked amount reflects the price at session creation
    assert_eq!(outcome.booking.unwrap().total_amount_cents, 35_000);
}
