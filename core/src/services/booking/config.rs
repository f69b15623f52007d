//! Booking service configuration.

/// Configuration for checkout-session orchestration
#[derive(Debug, Clone)]
pub struct BookingServiceConfig {
    /// How long a pending booking holds its date range, in minutes
    pub hold_ttl_minutes: i64,

    /// Success redirect URL, carrying the provider's session-id placeholder
    pub success_url: String,

    /// Cancel redirect URL template; `{listing_id}` is substituted
    pub cancel_url_template: String,
}

impl Default for BookingServiceConfig {
    fn default() -> Self {
        Self {
            hold_ttl_minutes: 30,
            success_url: String::from(
                "http://localhost:5173/booking/success?session_id={CHECKOUT_SESSION_ID}",
            ),
            cancel_url_template: String::from("http://localhost:5173/listing/{listing_id}"),
        }
    }
}

impl BookingServiceConfig {
    /// Cancel URL for a concrete listing.
    pub fn cancel_url(&self, listing_id: &str) -> String {
        self.cancel_url_template.replace("{listing_id}", listing_id)
    }
}
