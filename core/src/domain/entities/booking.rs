//! Booking entity and its payment-driven lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::DatePeriod;

/// Payment-driven status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created at checkout-session start; holds the date range until paid or expired
    Pending,
    /// Payment confirmed by reconciliation; terminal
    Paid,
    /// Reserved for payment-failure handling; no transition produces it yet
    Failed,
    /// Hold expired or booking withdrawn; terminal
    Cancelled,
}

impl BookingStatus {
    /// Stable tag used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Paid => "paid",
            BookingStatus::Failed => "failed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Parses the storage tag back into a status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BookingStatus::Pending),
            "paid" => Some(BookingStatus::Paid),
            "failed" => Some(BookingStatus::Failed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// A reservation of a listing for a date range, created when checkout starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking
    pub id: Uuid,

    /// Listing being reserved
    pub listing_id: Uuid,

    /// Host that owns the listing, denormalized for notification lookups
    pub host_id: Uuid,

    /// Guest that initiated the checkout
    pub guest_id: Uuid,

    /// First night of the stay (inclusive)
    pub check_in: NaiveDate,

    /// Check-out day (exclusive)
    pub check_out: NaiveDate,

    /// Number of guests staying
    pub guests: u32,

    /// Total charged amount in minor currency units, fixed at session creation
    pub total_amount_cents: i64,

    /// External checkout session this booking is tied to
    pub checkout_session_id: String,

    /// Current lifecycle status
    pub status: BookingStatus,

    /// When a pending booking stops holding its date range
    pub hold_expires_at: DateTime<Utc>,

    /// Timestamp when the booking was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the booking was last updated
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a pending booking tied to an external checkout session.
    ///
    /// The caller has already validated `check_in < check_out` and computed
    /// the immutable total.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        listing_id: Uuid,
        host_id: Uuid,
        guest_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
        total_amount_cents: i64,
        checkout_session_id: String,
        hold_expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            listing_id,
            host_id,
            guest_id,
            check_in,
            check_out,
            guests,
            total_amount_cents,
            checkout_session_id,
            status: BookingStatus::Pending,
            hold_expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// The reserved date range as a half-open period.
    pub fn period(&self) -> DatePeriod {
        DatePeriod {
            start_date: self.check_in,
            end_date: self.check_out,
        }
    }

    /// Applies the pending-to-paid transition.
    ///
    /// Returns `true` if the transition was applied, `false` if the booking
    /// was already paid (duplicate reconciliation is a no-op).
    pub fn mark_paid(&mut self) -> bool {
        if self.status == BookingStatus::Paid {
            return false;
        }
        self.status = BookingStatus::Paid;
        self.updated_at = Utc::now();
        true
    }

    /// Cancels the booking (hold expiry sweep).
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
        self.updated_at = Utc::now();
    }

    /// Whether this booking currently blocks its date range.
    ///
    /// Paid bookings always block; pending bookings block only while their
    /// hold is alive.
    pub fn blocks_at(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            BookingStatus::Paid => true,
            BookingStatus::Pending => self.hold_expires_at > now,
            BookingStatus::Failed | BookingStatus::Cancelled => false,
        }
    }

    /// Whether this is a pending booking whose hold has lapsed.
    pub fn hold_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == BookingStatus::Pending && self.hold_expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_booking() -> Booking {
        Booking::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            2,
            45_000,
            "cs_test_123".to_string(),
            Utc::now() + Duration::minutes(30),
        )
    }

    #[test]
    fn test_new_booking_is_pending() {
        let booking = sample_booking();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.period().nights(), 4);
    }

    #[test]
    fn test_mark_paid_is_idempotent() {
        let mut booking = sample_booking();
        assert!(booking.mark_paid());
        assert_eq!(booking.status, BookingStatus::Paid);
        // Second application is a no-op
        assert!(!booking.mark_paid());
        assert_eq!(booking.status, BookingStatus::Paid);
    }

    #[test]
    fn test_pending_blocks_only_while_hold_alive() {
        let mut booking = sample_booking();
        let now = Utc::now();
        assert!(booking.blocks_at(now));
        booking.hold_expires_at = now - Duration::minutes(1);
        assert!(!booking.blocks_at(now));
        assert!(booking.hold_expired(now));
    }

    #[test]
    fn test_paid_blocks_regardless_of_hold() {
        let mut booking = sample_booking();
        booking.hold_expires_at = Utc::now() - Duration::hours(1);
        booking.mark_paid();
        assert!(booking.blocks_at(Utc::now()));
        assert!(!booking.hold_expired(Utc::now()));
    }

    #[test]
    fn test_cancelled_does_not_block() {
        let mut booking = sample_booking();
        booking.cancel();
        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert!(!booking.blocks_at(Utc::now()));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Paid,
            BookingStatus::Failed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::parse("expired"), None);
    }
}
