use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use se_core::domain::entities::booking::Booking;
use se_core::services::payment::PaymentSessionStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCheckoutRequest {
    pub listing_id: Uuid,

    /// First night of the stay (inclusive)
    pub check_in: NaiveDate,

    /// Check-out day (exclusive)
    pub check_out: NaiveDate,

    #[validate(range(min = 1))]
    pub guests: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// Hosted checkout URL to redirect the guest to
    pub url: String,
    pub booking_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub status: PaymentSessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking: Booking,
}
