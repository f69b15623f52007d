//! Availability checker tests.

use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::{DatePeriod, Location};
use crate::errors::DomainError;
use crate::repositories::{MockBookingRepository, MockListingRepository};
use crate::services::availability::service::AvailabilityService;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn period(start: NaiveDate, end: NaiveDate) -> DatePeriod {
    DatePeriod::new(start, end).unwrap()
}

fn sample_listing() -> Listing {
    Listing::new(
        Uuid::new_v4(),
        "Harbour loft".to_string(),
        "Bright loft near the quay".to_string(),
        10_000,
        Location::new("1 Quay Rd", "Sydney", "Australia", -33.86, 151.21),
    )
}

fn booking_for(
    listing: &Listing,
    check_in: NaiveDate,
    check_out: NaiveDate,
    hold_minutes: i64,
) -> Booking {
    Booking::new(
        listing.id,
        listing.host_id,
        Uuid::new_v4(),
        check_in,
        check_out,
        2,
        40_000,
        format!("cs_{}", Uuid::new_v4()),
        Utc::now() + Duration::minutes(hold_minutes),
    )
}

async fn service_with(
    listing: Listing,
    bookings: Vec<Booking>,
) -> AvailabilityService<MockListingRepository, MockBookingRepository> {
    let listings = Arc::new(MockListingRepository::new());
    listings.insert(listing).await;
    let booking_repo = Arc::new(MockBookingRepository::new());
    for b in bookings {
        booking_repo.insert(b).await;
    }
    AvailabilityService::new(listings, booking_repo)
}

#[tokio::test]
async fn test_unknown_listing_is_not_found() {
    let service = service_with(sample_listing(), Vec::new()).await;
    let result = service
        .check_range(
            Uuid::new_v4(),
            &period(date(2026, 3, 1), date(2026, 3, 5)),
        )
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_paid_booking_blocks_overlapping_range() {
    let listing = sample_listing();
    let mut paid = booking_for(&listing, date(2026, 3, 1), date(2026, 3, 5), 30);
    paid.mark_paid();
    let service = service_with(listing.clone(), vec![paid]).await;

    // Partial overlap at the tail
    let check = service
        .check_range(listing.id, &period(date(2026, 3, 4), date(2026, 3, 6)))
        .await
        .unwrap();
    assert!(!check.available);
    assert_eq!(
        check.conflict,
        Some(period(date(2026, 3, 1), date(2026, 3, 5)))
    );
}

#[tokio::test]
async fn test_half_open_boundary_touch_is_available() {
    let listing = sample_listing();
    let mut paid = booking_for(&listing, date(2026, 3, 1), date(2026, 3, 5), 30);
    paid.mark_paid();
    let service = service_with(listing.clone(), vec![paid]).await;

    let check = service
        .check_range(listing.id, &period(date(2026, 3, 5), date(2026, 3, 6)))
        .await
        .unwrap();
    assert!(check.available);
    assert!(check.conflict.is_none());
}

#[tokio::test]
async fn test_pending_hold_blocks_until_expired() {
    let listing = sample_listing();
    let pending = booking_for(&listing, date(2026, 3, 10), date(2026, 3, 12), 30);
    let service = service_with(listing.clone(), vec![pending]).await;

    let check = service
        .check_range(listing.id, &period(date(2026, 3, 11), date(2026, 3, 13)))
        .await
        .unwrap();
    assert!(!check.available);
}

#[tokio::test]
async fn test_expired_hold_does_not_block() {
    let listing = sample_listing();
    let expired = booking_for(&listing, date(2026, 3, 10), date(2026, 3, 12), -5);
    let service = service_with(listing.clone(), vec![expired]).await;

    let check = service
        .check_range(listing.id, &period(date(2026, 3, 11), date(2026, 3, 13)))
        .await
        .unwrap();
    assert!(check.available);
}

#[tokio::test]
async fn test_blackout_period_blocks() {
    let mut listing = sample_listing();
    listing.set_availability(vec![period(date(2026, 7, 1), date(2026, 7, 15))]);
    let service = service_with(listing.clone(), Vec::new()).await;

    let check = service
        .check_range(listing.id, &period(date(2026, 7, 10), date(2026, 7, 20)))
        .await
        .unwrap();
    assert!(!check.available);
    assert_eq!(
        check.conflict,
        Some(period(date(2026, 7, 1), date(2026, 7, 15)))
    );
}

#[tokio::test]
async fn test_unavailable_periods_merges_bookings_and_blackouts() {
    let mut listing = sample_listing();
    listing.set_availability(vec![period(date(2026, 3, 4), date(2026, 3, 8))]);

    let mut paid = booking_for(&listing, date(2026, 3, 1), date(2026, 3, 5), 30);
    paid.mark_paid();
    let pending = booking_for(&listing, date(2026, 3, 20), date(2026, 3, 22), 30);
    let mut cancelled = booking_for(&listing, date(2026, 3, 25), date(2026, 3, 28), 30);
    cancelled.cancel();

    let service = service_with(listing.clone(), vec![paid, pending, cancelled]).await;
    let periods = service.unavailable_periods(listing.id).await.unwrap();

    // Paid booking and adjacent blackout merge; cancelled booking is invisible
    assert_eq!(
        periods,
        vec![
            period(date(2026, 3, 1), date(2026, 3, 8)),
            period(date(2026, 3, 20), date(2026, 3, 22)),
        ]
    );
}

#[tokio::test]
async fn test_unavailable_periods_empty_listing() {
    let listing = sample_listing();
    let service = service_with(listing.clone(), Vec::new()).await;
    let periods = service.unavailable_periods(listing.id).await.unwrap();
    assert!(periods.is_empty());
}
