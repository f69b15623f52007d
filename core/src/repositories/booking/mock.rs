//! Mock implementation of BookingRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::domain::value_objects::DatePeriod;
use crate::errors::DomainError;

use super::trait_::BookingRepository;

/// Mock booking repository backed by an in-memory map
pub struct MockBookingRepository {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl MockBookingRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            bookings: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed the repository with a booking, bypassing create semantics
    pub async fn insert(&self, booking: Booking) {
        self.bookings.write().await.insert(booking.id, booking);
    }
}

impl Default for MockBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;

        if !bookings.contains_key(&booking.id) {
            return Err(DomainError::not_found("Booking"));
        }

        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .find(|b| b.checkout_session_id == session_id)
            .cloned())
    }

    async fn find_blocking_for_listing(
        &self,
        listing_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| b.listing_id == listing_id && b.blocks_at(now))
            .cloned()
            .collect())
    }

    async fn find_blocking_in_period(
        &self,
        listing_id: Uuid,
        period: &DatePeriod,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| {
                b.listing_id == listing_id && b.blocks_at(now) && b.period().overlaps(period)
            })
            .cloned()
            .collect())
    }

    async fn find_blocked_listing_ids(
        &self,
        period: &DatePeriod,
        now: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, DomainError> {
        let bookings = self.bookings.read().await;
        let mut ids: Vec<Uuid> = bookings
            .values()
            .filter(|b| b.blocks_at(now) && b.period().overlaps(period))
            .map(|b| b.listing_id)
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    async fn find_expired_holds(
        &self,
        now: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        let mut expired: Vec<Booking> = bookings
            .values()
            .filter(|b| b.hold_expired(now))
            .cloned()
            .collect();
        expired.sort_by_key(|b| b.hold_expires_at);
        expired.truncate(limit as usize);
        Ok(expired)
    }
}
