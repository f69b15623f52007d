//! Outbound email provider configuration

use serde::{Deserialize, Serialize};

/// Email provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// API key for the email provider
    pub api_key: String,

    /// From address for all outbound mail
    pub from_address: String,

    /// Display name for the from address
    pub from_name: String,

    /// Outbox worker poll interval in seconds
    pub worker_interval_seconds: u64,

    /// Maximum delivery attempts per queued notification
    pub max_attempts: u32,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            from_address: String::from("no-reply@stayeasy.example"),
            from_name: String::from("StayEasy"),
            worker_interval_seconds: 15,
            max_attempts: 5,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("SENDGRID_API_KEY").unwrap_or(defaults.api_key),
            from_address: std::env::var("EMAIL_FROM_ADDRESS").unwrap_or(defaults.from_address),
            from_name: std::env::var("EMAIL_FROM_NAME").unwrap_or(defaults.from_name),
            worker_interval_seconds: std::env::var("OUTBOX_WORKER_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.worker_interval_seconds),
            max_attempts: std::env::var("OUTBOX_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_attempts),
        }
    }
}
