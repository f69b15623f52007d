//! Availability checker over bookings and host blackouts.
//!
//! A date range is blocked by paid bookings, by pending bookings whose hold
//! has not expired, and by host-defined blackout periods. The same blocking
//! set is used everywhere availability is consulted (calendar display,
//! checkout-session creation, search), so a range shown as free can actually
//! be booked.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::value_objects::{merge_periods, DatePeriod};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BookingRepository, ListingRepository};

/// Outcome of checking a candidate date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCheck {
    /// Whether the range can be booked
    pub available: bool,

    /// The merged blocking period overlapping the query, when unavailable
    pub conflict: Option<DatePeriod>,
}

impl RangeCheck {
    fn available() -> Self {
        Self {
            available: true,
            conflict: None,
        }
    }

    fn blocked(conflict: DatePeriod) -> Self {
        Self {
            available: false,
            conflict: Some(conflict),
        }
    }
}

/// Availability service over listing blackouts and blocking bookings
pub struct AvailabilityService<L: ListingRepository, B: BookingRepository> {
    listing_repository: Arc<L>,
    booking_repository: Arc<B>,
}

impl<L: ListingRepository, B: BookingRepository> AvailabilityService<L, B> {
    /// Create a new availability service
    pub fn new(listing_repository: Arc<L>, booking_repository: Arc<B>) -> Self {
        Self {
            listing_repository,
            booking_repository,
        }
    }

    /// Check whether `period` can be booked on the listing.
    ///
    /// # Returns
    /// * `Ok(RangeCheck)` - availability verdict with the conflicting merged
    ///   period when blocked
    /// * `Err(DomainError::NotFound)` - the listing does not exist
    pub async fn check_range(
        &self,
        listing_id: Uuid,
        period: &DatePeriod,
    ) -> DomainResult<RangeCheck> {
        let listing = self
            .listing_repository
            .find_by_id(listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))?;

        let now = Utc::now();
        let mut conflicts: Vec<DatePeriod> = self
            .booking_repository
            .find_blocking_in_period(listing_id, period, now)
            .await?
            .iter()
            .map(|b| b.period())
            .collect();

        conflicts.extend(
            listing
                .availability
                .iter()
                .filter(|blackout| blackout.overlaps(period))
                .copied(),
        );

        if conflicts.is_empty() {
            return Ok(RangeCheck::available());
        }

        // Report the first merged conflict so the caller can show the
        // blocked span rather than an arbitrary booking's dates.
        let merged = merge_periods(conflicts);
        Ok(RangeCheck::blocked(merged[0]))
    }

    /// The merged set of unavailable periods for calendar rendering.
    ///
    /// Combines blocking bookings and blackout periods; the caller cannot
    /// distinguish the conflict reasons.
    pub async fn unavailable_periods(&self, listing_id: Uuid) -> DomainResult<Vec<DatePeriod>> {
        let listing = self
            .listing_repository
            .find_by_id(listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))?;

        let now = Utc::now();
        let mut periods: Vec<DatePeriod> = self
            .booking_repository
            .find_blocking_for_listing(listing_id, now)
            .await?
            .iter()
            .map(|b| b.period())
            .collect();

        periods.extend(listing.availability.iter().copied());

        Ok(merge_periods(periods))
    }
}
