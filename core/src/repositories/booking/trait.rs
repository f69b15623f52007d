//! Booking repository trait defining the interface for booking persistence.
//!
//! Every query that feeds an availability decision takes the current time so
//! that expired pending holds can be excluded in the query itself; callers
//! never see a hold that has already lapsed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::domain::value_objects::DatePeriod;
use crate::errors::DomainError;

/// Repository trait for Booking entity persistence operations
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// Replace an existing booking
    ///
    /// # Returns
    /// * `Ok(Booking)` - The updated booking
    /// * `Err(DomainError::NotFound)` - No booking with the given id
    async fn update(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// Find a booking by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError>;

    /// Find the booking tied to an external checkout session
    async fn find_by_session_id(&self, session_id: &str)
        -> Result<Option<Booking>, DomainError>;

    /// All bookings currently blocking the given listing: `paid` plus
    /// `pending` with an unexpired hold as of `now`
    async fn find_blocking_for_listing(
        &self,
        listing_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Blocking bookings for the listing whose date range overlaps `period`
    /// under the half-open test
    async fn find_blocking_in_period(
        &self,
        listing_id: Uuid,
        period: &DatePeriod,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Ids of all listings that have any blocking booking overlapping
    /// `period`; used to exclude them from search results
    async fn find_blocked_listing_ids(
        &self,
        period: &DatePeriod,
        now: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, DomainError>;

    /// Pending bookings whose hold lapsed at or before `now`, oldest first,
    /// capped at `limit`; consumed by the hold expiry sweep
    async fn find_expired_holds(
        &self,
        now: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Booking>, DomainError>;
}
