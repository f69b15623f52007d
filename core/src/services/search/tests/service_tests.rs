//! Search filter tests.

use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::Location;
use crate::errors::DomainError;
use crate::repositories::{MockBookingRepository, MockListingRepository};
use crate::services::search::service::{SearchFilters, SearchService};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn listing(city: &str, max_guests: u32) -> Listing {
    let mut listing = Listing::new(
        Uuid::new_v4(),
        format!("Stay in {city}"),
        "A lovely stay".to_string(),
        10_000,
        Location::new("1 Main St", city, "Australia", -33.86, 151.21),
    );
    listing.max_guests = max_guests;
    listing
}

fn hold(listing: &Listing, check_in: NaiveDate, check_out: NaiveDate, minutes: i64) -> Booking {
    Booking::new(
        listing.id,
        listing.host_id,
        Uuid::new_v4(),
        check_in,
        check_out,
        2,
        40_000,
        format!("cs_{}", Uuid::new_v4()),
        Utc::now() + Duration::minutes(minutes),
    )
}

struct Fixture {
    service: SearchService<MockListingRepository, MockBookingRepository>,
    bookings: Arc<MockBookingRepository>,
}

async fn fixture(listings: Vec<Listing>) -> Fixture {
    let listing_repo = Arc::new(MockListingRepository::new());
    for l in listings {
        listing_repo.insert(l).await;
    }
    let bookings = Arc::new(MockBookingRepository::new());
    Fixture {
        service: SearchService::new(listing_repo, bookings.clone()),
        bookings,
    }
}

#[tokio::test]
async fn test_no_filters_returns_everything() {
    let f = fixture(vec![listing("Sydney", 2), listing("Melbourne", 4)]).await;
    let results = f.service.search(SearchFilters::default()).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_city_filter_is_case_insensitive_substring() {
    let f = fixture(vec![listing("Sydney", 2), listing("Melbourne", 4)]).await;
    let results = f
        .service
        .search(SearchFilters {
            city: Some("syd".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].location.city, "Sydney");
}

#[tokio::test]
async fn test_guest_capacity_filter() {
    let f = fixture(vec![listing("Sydney", 2), listing("Sydney", 6)]).await;
    let results = f
        .service
        .search(SearchFilters {
            guests: Some(4),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].max_guests, 6);
}

#[tokio::test]
async fn test_pending_hold_excludes_listing_from_dated_search() {
    let held = listing("Sydney", 4);
    let free = listing("Sydney", 4);
    let f = fixture(vec![held.clone(), free.clone()]).await;

    // Unpaid but live hold on the queried range
    f.bookings
        .insert(hold(&held, date(2026, 3, 1), date(2026, 3, 5), 30))
        .await;

    let results = f
        .service
        .search(SearchFilters {
            check_in: Some(date(2026, 3, 3)),
            check_out: Some(date(2026, 3, 6)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, free.id);
}

#[tokio::test]
async fn test_paid_booking_excludes_listing_from_dated_search() {
    let booked = listing("Sydney", 4);
    let f = fixture(vec![booked.clone()]).await;

    let mut paid = hold(&booked, date(2026, 3, 1), date(2026, 3, 5), 30);
    paid.mark_paid();
    f.bookings.insert(paid).await;

    let overlapping = f
        .service
        .search(SearchFilters {
            check_in: Some(date(2026, 3, 4)),
            check_out: Some(date(2026, 3, 6)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(overlapping.is_empty());

    // Adjacent range is fine under the half-open test
    let adjacent = f
        .service
        .search(SearchFilters {
            check_in: Some(date(2026, 3, 5)),
            check_out: Some(date(2026, 3, 8)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(adjacent.len(), 1);
}

#[tokio::test]
async fn test_expired_hold_does_not_exclude() {
    let held = listing("Sydney", 4);
    let f = fixture(vec![held.clone()]).await;
    f.bookings
        .insert(hold(&held, date(2026, 3, 1), date(2026, 3, 5), -10))
        .await;

    let results = f
        .service
        .search(SearchFilters {
            check_in: Some(date(2026, 3, 1)),
            check_out: Some(date(2026, 3, 5)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_half_range_is_rejected() {
    let f = fixture(vec![listing("Sydney", 4)]).await;
    let result = f
        .service
        .search(SearchFilters {
            check_in: Some(date(2026, 3, 1)),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_inverted_range_is_rejected() {
    let f = fixture(vec![listing("Sydney", 4)]).await;
    let result = f
        .service
        .search(SearchFilters {
            check_in: Some(date(2026, 3, 5)),
            check_out: Some(date(2026, 3, 1)),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}
