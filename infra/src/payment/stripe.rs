//! Stripe Checkout Implementation
//!
//! This module provides hosted checkout sessions using the Stripe API.
//! It implements the PaymentGateway trait for production payments.
//!
//! ## Features
//!
//! - Hosted checkout session creation with priced line items
//! - Session status retrieval for poll-based reconciliation
//! - Automatic retry with exponential backoff on transport errors
//! - Security: the secret key is never logged

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use se_core::errors::DomainError;
use se_core::services::payment::{
    CheckoutSession, CreateSessionRequest, PaymentGateway, PaymentSessionStatus,
};

use crate::InfrastructureError;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Stripe gateway configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Stripe secret API key
    pub secret_key: String,
    /// ISO currency code for line items
    pub currency: String,
    /// Maximum retry attempts for failed requests
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl StripeConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| InfrastructureError::Config("STRIPE_SECRET_KEY not set".to_string()))?;

        if !secret_key.starts_with("sk_") {
            return Err(InfrastructureError::Config(
                "STRIPE_SECRET_KEY must be a secret key (starting with 'sk_')".to_string(),
            ));
        }

        Ok(Self {
            secret_key,
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            max_retries: std::env::var("STRIPE_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("STRIPE_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_secs: std::env::var("STRIPE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
    payment_status: Option<String>,
}

/// Stripe Checkout implementation of PaymentGateway
pub struct StripeCheckoutGateway {
    client: reqwest::Client,
    config: StripeConfig,
}

impl StripeCheckoutGateway {
    /// Create a new Stripe gateway
    pub fn new(config: StripeConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfrastructureError::Payment(format!("HTTP client build failed: {e}")))?;

        info!(currency = %config.currency, "Stripe checkout gateway initialized");

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    /// Flatten a session request into Stripe's form encoding.
    fn form_params(&self, request: &CreateSessionRequest) -> Vec<(String, String)> {
        let mut params = vec![
            ("mode".to_string(), "payment".to_string()),
            (
                "payment_method_types[]".to_string(),
                "card".to_string(),
            ),
            (
                "line_items[0][price_data][currency]".to_string(),
                self.config.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                request.line_item.name.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]".to_string(),
                request.line_item.description.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                request.line_item.unit_amount_cents.to_string(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
        ];

        if let Some(image) = &request.line_item.image {
            params.push((
                "line_items[0][price_data][product_data][images][]".to_string(),
                image.clone(),
            ));
        }

        for (key, value) in &request.metadata {
            params.push((format!("metadata[{key}]"), value.clone()));
        }

        params
    }

    /// Issue a request with exponential backoff on transport errors and
    /// retryable statuses (429 and 5xx).
    async fn send_with_retry(
        &self,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<SessionResponse, DomainError> {
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut last_error = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                debug!(attempt, "Retrying Stripe request");
                tokio::time::sleep(delay).await;
                delay *= 2;
            }

            let response = match build().send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!(attempt, error = %e, "Stripe request transport error");
                    last_error = e.to_string();
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                warn!(attempt, status = status.as_u16(), "Stripe returned retryable status");
                last_error = format!("HTTP {status}");
                continue;
            }

            let body = response
                .text()
                .await
                .map_err(|e| DomainError::upstream("stripe", format!("body read failed: {e}")))?;

            if !status.is_success() {
                error!(status = status.as_u16(), "Stripe rejected the request");
                return Err(DomainError::upstream(
                    "stripe",
                    format!("HTTP {status}: {body}"),
                ));
            }

            return serde_json::from_str(&body)
                .map_err(|e| DomainError::upstream("stripe", format!("invalid response: {e}")));
        }

        Err(DomainError::upstream(
            "stripe",
            format!("retries exhausted: {last_error}"),
        ))
    }
}

#[async_trait]
impl PaymentGateway for StripeCheckoutGateway {
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CheckoutSession, DomainError> {
        let params = self.form_params(&request);
        let url = format!("{STRIPE_API_BASE}/checkout/sessions");

        let session = self
            .send_with_retry(|| {
                self.client
                    .post(&url)
                    .bearer_auth(&self.config.secret_key)
                    .form(&params)
            })
            .await?;

        let redirect_url = session.url.ok_or_else(|| {
            DomainError::upstream("stripe", "session created without redirect URL")
        })?;

        info!(session_id = %session.id, "Stripe checkout session created");

        Ok(CheckoutSession {
            id: session.id,
            url: redirect_url,
        })
    }

    async fn get_session_status(
        &self,
        session_id: &str,
    ) -> Result<PaymentSessionStatus, DomainError> {
        let url = format!("{STRIPE_API_BASE}/checkout/sessions/{session_id}");

        let session = self
            .send_with_retry(|| self.client.get(&url).bearer_auth(&self.config.secret_key))
            .await?;

        match session.payment_status.as_deref() {
            Some("paid") => Ok(PaymentSessionStatus::Paid),
            Some("no_payment_required") => Ok(PaymentSessionStatus::NoPaymentRequired),
            Some("unpaid") | None => Ok(PaymentSessionStatus::Unpaid),
            Some(other) => Err(DomainError::upstream(
                "stripe",
                format!("unknown payment status: {other}"),
            )),
        }
    }
}
