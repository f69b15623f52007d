//! SendGrid Mail Implementation
//!
//! Implements the Mailer trait against SendGrid's v3 mail send API.
//! Single-attempt delivery; the outbox worker owns retries.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use se_core::errors::DomainError;
use se_core::services::notification::Mailer;

use crate::InfrastructureError;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// SendGrid mailer configuration
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    /// SendGrid API key
    pub api_key: String,
    /// From address for all outbound mail
    pub from_address: String,
    /// Display name for the from address
    pub from_name: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl SendGridConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let api_key = std::env::var("SENDGRID_API_KEY")
            .map_err(|_| InfrastructureError::Config("SENDGRID_API_KEY not set".to_string()))?;
        let from_address = std::env::var("EMAIL_FROM_ADDRESS")
            .map_err(|_| InfrastructureError::Config("EMAIL_FROM_ADDRESS not set".to_string()))?;

        Ok(Self {
            api_key,
            from_address,
            from_name: std::env::var("EMAIL_FROM_NAME")
                .unwrap_or_else(|_| "StayEasy".to_string()),
            request_timeout_secs: std::env::var("SENDGRID_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// SendGrid implementation of Mailer
pub struct SendGridMailer {
    client: reqwest::Client,
    config: SendGridConfig,
}

impl SendGridMailer {
    /// Create a new SendGrid mailer
    pub fn new(config: SendGridConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfrastructureError::Email(format!("HTTP client build failed: {e}")))?;

        info!(from = %config.from_address, "SendGrid mailer initialized");

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let config = SendGridConfig::from_env()?;
        Self::new(config)
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body_text: &str,
        body_html: &str,
    ) -> Result<String, DomainError> {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": {
                "email": self.config.from_address,
                "name": self.config.from_name,
            },
            "subject": subject,
            "content": [
                { "type": "text/plain", "value": body_text },
                { "type": "text/html", "value": body_html },
            ],
        });

        let response = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::upstream("sendgrid", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::upstream(
                "sendgrid",
                format!("HTTP {status}: {body}"),
            ));
        }

        // SendGrid returns the message id in the X-Message-Id header
        let message_id = response
            .headers()
            .get("X-Message-Id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        debug!(to, message_id = %message_id, "Email accepted by SendGrid");
        Ok(message_id)
    }
}
