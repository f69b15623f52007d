//! MySQL implementation of the BookingRepository trait.
//!
//! The blocking predicate (`paid`, or `pending` with a live hold) is applied
//! in SQL so expired holds never reach the domain layer from availability
//! queries.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use se_core::domain::entities::booking::{Booking, BookingStatus};
use se_core::domain::value_objects::DatePeriod;
use se_core::errors::DomainError;
use se_core::repositories::BookingRepository;

/// MySQL implementation of BookingRepository
pub struct MySqlBookingRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    /// Create a new MySQL booking repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Booking entity
    fn row_to_booking(row: &sqlx::mysql::MySqlRow) -> Result<Booking, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("Failed to get id: {e}")))?;
        let listing_id: String = row
            .try_get("listing_id")
            .map_err(|e| DomainError::Database(format!("Failed to get listing_id: {e}")))?;
        let host_id: String = row
            .try_get("host_id")
            .map_err(|e| DomainError::Database(format!("Failed to get host_id: {e}")))?;
        let guest_id: String = row
            .try_get("guest_id")
            .map_err(|e| DomainError::Database(format!("Failed to get guest_id: {e}")))?;

        let status_str: String = row
            .try_get("status")
            .map_err(|e| DomainError::Database(format!("Failed to get status: {e}")))?;
        let status = BookingStatus::parse(&status_str)
            .ok_or_else(|| DomainError::Database(format!("Unknown status: {status_str}")))?;

        let parse_uuid = |value: &str| {
            Uuid::parse_str(value)
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {e}")))
        };

        Ok(Booking {
            id: parse_uuid(&id)?,
            listing_id: parse_uuid(&listing_id)?,
            host_id: parse_uuid(&host_id)?,
            guest_id: parse_uuid(&guest_id)?,
            check_in: row
                .try_get::<NaiveDate, _>("check_in")
                .map_err(|e| DomainError::Database(format!("Failed to get check_in: {e}")))?,
            check_out: row
                .try_get::<NaiveDate, _>("check_out")
                .map_err(|e| DomainError::Database(format!("Failed to get check_out: {e}")))?,
            guests: row
                .try_get("guests")
                .map_err(|e| DomainError::Database(format!("Failed to get guests: {e}")))?,
            total_amount_cents: row
                .try_get("total_amount_cents")
                .map_err(|e| {
                    DomainError::Database(format!("Failed to get total_amount_cents: {e}"))
                })?,
            checkout_session_id: row
                .try_get("checkout_session_id")
                .map_err(|e| {
                    DomainError::Database(format!("Failed to get checkout_session_id: {e}"))
                })?,
            status,
            hold_expires_at: row
                .try_get::<DateTime<Utc>, _>("hold_expires_at")
                .map_err(|e| {
                    DomainError::Database(format!("Failed to get hold_expires_at: {e}"))
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {e}")))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database(format!("Failed to get updated_at: {e}")))?,
        })
    }
}

const BOOKING_COLUMNS: &str = r#"id, listing_id, host_id, guest_id, check_in, check_out,
       guests, total_amount_cents, checkout_session_id, status, hold_expires_at,
       created_at, updated_at"#;

/// `paid`, or `pending` with a hold that has not lapsed at the bound time
const BLOCKING_PREDICATE: &str =
    "(status = 'paid' OR (status = 'pending' AND hold_expires_at > ?))";

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        let query = r#"
            INSERT INTO bookings (id, listing_id, host_id, guest_id, check_in, check_out,
                                  guests, total_amount_cents, checkout_session_id, status,
                                  hold_expires_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(booking.id.to_string())
            .bind(booking.listing_id.to_string())
            .bind(booking.host_id.to_string())
            .bind(booking.guest_id.to_string())
            .bind(booking.check_in)
            .bind(booking.check_out)
            .bind(booking.guests)
            .bind(booking.total_amount_cents)
            .bind(&booking.checkout_session_id)
            .bind(booking.status.as_str())
            .bind(booking.hold_expires_at)
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to create booking: {e}")))?;

        Ok(booking)
    }

    async fn update(&self, booking: Booking) -> Result<Booking, DomainError> {
        let query = r#"
            UPDATE bookings
            SET status = ?, hold_expires_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(booking.status.as_str())
            .bind(booking.hold_expires_at)
            .bind(booking.updated_at)
            .bind(booking.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to update booking: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Booking"));
        }

        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_booking(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<Booking>, DomainError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE checkout_session_id = ? LIMIT 1"
        );

        let result = sqlx::query(&query)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_booking(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_blocking_for_listing(
        &self,
        listing_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>, DomainError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE listing_id = ? AND {BLOCKING_PREDICATE}"
        );

        let rows = sqlx::query(&query)
            .bind(listing_id.to_string())
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_booking).collect()
    }

    async fn find_blocking_in_period(
        &self,
        listing_id: Uuid,
        period: &DatePeriod,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>, DomainError> {
        // Half-open overlap: existing.start < query.end AND existing.end > query.start
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE listing_id = ? AND check_in < ? AND check_out > ? AND {BLOCKING_PREDICATE}"
        );

        let rows = sqlx::query(&query)
            .bind(listing_id.to_string())
            .bind(period.end_date)
            .bind(period.start_date)
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_booking).collect()
    }

    async fn find_blocked_listing_ids(
        &self,
        period: &DatePeriod,
        now: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, DomainError> {
        let query = format!(
            "SELECT DISTINCT listing_id FROM bookings
             WHERE check_in < ? AND check_out > ? AND {BLOCKING_PREDICATE}"
        );

        let rows = sqlx::query(&query)
            .bind(period.end_date)
            .bind(period.start_date)
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row
                    .try_get("listing_id")
                    .map_err(|e| DomainError::Database(format!("Failed to get listing_id: {e}")))?;
                Uuid::parse_str(&id)
                    .map_err(|e| DomainError::Database(format!("Invalid UUID: {e}")))
            })
            .collect()
    }

    async fn find_expired_holds(
        &self,
        now: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Booking>, DomainError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE status = 'pending' AND hold_expires_at <= ?
             ORDER BY hold_expires_at ASC
             LIMIT ?"
        );

        let rows = sqlx::query(&query)
            .bind(now)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_booking).collect()
    }
}
