//! Checkout-session orchestration and payment reconciliation.
//!
//! Session creation prices the stay, opens a hosted checkout session with
//! the payment provider and persists a pending booking tied to it. The
//! booking is promoted to paid only by [`BookingService::reconcile`], which
//! asks the provider for ground truth; the success-page poll is the
//! authoritative path, so nothing here depends on webhook delivery.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::DatePeriod;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BookingRepository, ListingRepository, OutboxRepository, UserRepository};
use crate::services::availability::AvailabilityService;
use crate::services::notification::templates;
use crate::services::payment::{
    CreateSessionRequest, LineItem, PaymentGateway, PaymentSessionStatus,
};

use super::config::BookingServiceConfig;

/// Result of creating a checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRedirect {
    /// Hosted checkout URL the guest is redirected to
    pub url: String,

    /// Local booking created in pending state
    pub booking_id: Uuid,
}

/// Result of reconciling a checkout session against the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// Payment status reported by the provider
    pub payment_status: PaymentSessionStatus,

    /// The booking tied to the session, if one exists locally
    pub booking: Option<Booking>,
}

/// Orchestrates the payment-gated booking flow
pub struct BookingService<L, B, U, P, O>
where
    L: ListingRepository,
    B: BookingRepository,
    U: UserRepository,
    P: PaymentGateway,
    O: OutboxRepository,
{
    listing_repository: Arc<L>,
    booking_repository: Arc<B>,
    user_repository: Arc<U>,
    availability: Arc<AvailabilityService<L, B>>,
    payment_gateway: Arc<P>,
    outbox: Arc<O>,
    config: BookingServiceConfig,
}

impl<L, B, U, P, O> BookingService<L, B, U, P, O>
where
    L: ListingRepository,
    B: BookingRepository,
    U: UserRepository,
    P: PaymentGateway,
    O: OutboxRepository,
{
    /// Create a new booking service
    pub fn new(
        listing_repository: Arc<L>,
        booking_repository: Arc<B>,
        user_repository: Arc<U>,
        availability: Arc<AvailabilityService<L, B>>,
        payment_gateway: Arc<P>,
        outbox: Arc<O>,
        config: BookingServiceConfig,
    ) -> Self {
        Self {
            listing_repository,
            booking_repository,
            user_repository,
            availability,
            payment_gateway,
            outbox,
            config,
        }
    }

    /// Create a hosted checkout session and a pending booking tied to it.
    ///
    /// # Errors
    /// * `NotFound` - listing does not exist
    /// * `Validation` - invalid dates or guest count
    /// * `Conflict` - range blocked by a paid booking, live hold or blackout
    /// * `Upstream` - payment provider failed; no booking persisted
    pub async fn create_checkout_session(
        &self,
        listing_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
        guest_id: Uuid,
    ) -> DomainResult<CheckoutRedirect> {
        let listing = self
            .listing_repository
            .find_by_id(listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))?;

        let period = DatePeriod::new(check_in, check_out)
            .ok_or_else(|| DomainError::validation("check-out must be after check-in"))?;
        if guests == 0 {
            return Err(DomainError::validation("at least one guest is required"));
        }

        let check = self.availability.check_range(listing_id, &period).await?;
        if !check.available {
            let message = match check.conflict {
                Some(conflict) => format!(
                    "Selected dates are already booked ({} to {})",
                    conflict.start_date, conflict.end_date
                ),
                None => "Selected dates are already booked".to_string(),
            };
            return Err(DomainError::conflict(message));
        }

        let nights = period.nights().max(1);
        let total_amount_cents = listing.total_for_nights(nights);

        let session = self
            .payment_gateway
            .create_session(self.session_request(
                &listing, &period, nights, guests, guest_id, total_amount_cents,
            ))
            .await?;

        let hold_expires_at = Utc::now() + Duration::minutes(self.config.hold_ttl_minutes);
        let booking = Booking::new(
            listing.id,
            listing.host_id,
            guest_id,
            check_in,
            check_out,
            guests,
            total_amount_cents,
            session.id.clone(),
            hold_expires_at,
        );

        let booking = match self.booking_repository.create(booking).await {
            Ok(booking) => booking,
            Err(e) => {
                // The provider session exists but no local booking points at
                // it. Not auto-reconciled; flagged for the cleanup job.
                error!(
                    session_id = %session.id,
                    listing_id = %listing.id,
                    error = %e,
                    "Orphaned checkout session: booking persist failed after session creation"
                );
                return Err(e);
            }
        };

        info!(
            booking_id = %booking.id,
            session_id = %session.id,
            nights,
            total_amount_cents,
            "Created pending booking with checkout session"
        );

        Ok(CheckoutRedirect {
            url: session.url,
            booking_id: booking.id,
        })
    }

    /// Reconcile a checkout session against the provider's ground truth.
    ///
    /// Idempotent: re-reconciling an already-paid booking returns the
    /// existing record unchanged and enqueues no second notification.
    pub async fn reconcile(&self, session_id: &str) -> DomainResult<ReconcileOutcome> {
        let payment_status = self.payment_gateway.get_session_status(session_id).await?;

        if !payment_status.is_paid() {
            // Caller may poll again; no local state change
            return Ok(ReconcileOutcome {
                payment_status,
                booking: None,
            });
        }

        let booking = match self.booking_repository.find_by_session_id(session_id).await? {
            Some(booking) => booking,
            None => {
                warn!(
                    session_id,
                    "Session reported paid but no local booking references it"
                );
                return Ok(ReconcileOutcome {
                    payment_status,
                    booking: None,
                });
            }
        };

        let mut booking = booking;
        if !booking.mark_paid() {
            return Ok(ReconcileOutcome {
                payment_status,
                booking: Some(booking),
            });
        }

        let booking = self.booking_repository.update(booking).await?;
        info!(booking_id = %booking.id, session_id, "Booking reconciled to paid");

        self.enqueue_confirmation(&booking).await;

        Ok(ReconcileOutcome {
            payment_status,
            booking: Some(booking),
        })
    }

    /// Fetch a booking by id.
    pub async fn get_booking(&self, id: Uuid) -> DomainResult<Booking> {
        self.booking_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking"))
    }

    fn session_request(
        &self,
        listing: &Listing,
        period: &DatePeriod,
        nights: i64,
        guests: u32,
        guest_id: Uuid,
        total_amount_cents: i64,
    ) -> CreateSessionRequest {
        let mut metadata = HashMap::new();
        metadata.insert("listing_id".to_string(), listing.id.to_string());
        metadata.insert("guest_id".to_string(), guest_id.to_string());
        metadata.insert("check_in".to_string(), period.start_date.to_string());
        metadata.insert("check_out".to_string(), period.end_date.to_string());
        metadata.insert("guests".to_string(), guests.to_string());
        metadata.insert(
            "total_amount_cents".to_string(),
            total_amount_cents.to_string(),
        );

        CreateSessionRequest {
            line_item: LineItem {
                name: listing.title.clone(),
                description: format!(
                    "Booking for {} nights at {}",
                    nights, listing.location.city
                ),
                unit_amount_cents: total_amount_cents,
                image: listing.images.first().cloned(),
            },
            success_url: self.config.success_url.clone(),
            cancel_url: self.config.cancel_url(&listing.id.to_string()),
            metadata,
        }
    }

    /// Enqueue the confirmation email; delivery problems never surface to
    /// the caller and never reverse the paid transition.
    async fn enqueue_confirmation(&self, booking: &Booking) {
        let listing = match self.listing_repository.find_by_id(booking.listing_id).await {
            Ok(Some(listing)) => listing,
            Ok(None) => {
                warn!(booking_id = %booking.id, "Listing gone; skipping confirmation email");
                return;
            }
            Err(e) => {
                warn!(booking_id = %booking.id, error = %e, "Listing lookup failed; skipping confirmation email");
                return;
            }
        };

        let recipient = match self.user_repository.find_by_id(booking.guest_id).await {
            Ok(Some(guest)) => guest.email,
            Ok(None) => {
                warn!(booking_id = %booking.id, "Guest gone; skipping confirmation email");
                return;
            }
            Err(e) => {
                warn!(booking_id = %booking.id, error = %e, "Guest lookup failed; skipping confirmation email");
                return;
            }
        };

        let email = templates::booking_confirmation_email(&recipient, &listing, booking);
        if let Err(e) = self.outbox.enqueue(email).await {
            error!(
                booking_id = %booking.id,
                error = %e,
                "Failed to enqueue confirmation email; booking remains paid"
            );
        }
    }
}
