//! Payment gateway and checkout URL configuration

use serde::{Deserialize, Serialize};

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentConfig {
    /// Secret API key for the payment provider
    pub secret_key: String,

    /// Base URL of the client application, used to build redirect URLs
    pub client_url: String,

    /// ISO currency code for checkout line items
    pub currency: String,

    /// How long a pending booking holds its date range, in minutes
    pub hold_ttl_minutes: i64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            client_url: String::from("http://localhost:5173"),
            currency: String::from("usd"),
            hold_ttl_minutes: 30,
        }
    }
}

impl PaymentConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret_key: std::env::var("STRIPE_SECRET_KEY").unwrap_or(defaults.secret_key),
            client_url: std::env::var("CLIENT_URL").unwrap_or(defaults.client_url),
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or(defaults.currency),
            hold_ttl_minutes: std::env::var("BOOKING_HOLD_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.hold_ttl_minutes),
        }
    }

    /// Success redirect, parameterized with the provider's session placeholder
    pub fn success_url(&self) -> String {
        format!(
            "{}/booking/success?session_id={{CHECKOUT_SESSION_ID}}",
            self.client_url
        )
    }

    /// Cancel redirect back to the listing page
    pub fn cancel_url(&self, listing_id: &str) -> String {
        format!("{}/listing/{}", self.client_url, listing_id)
    }
}
