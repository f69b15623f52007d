//! Payment gateway collaborator interface.
//!
//! The checkout flow never talks to the payment provider's wire format
//! directly; it goes through this trait. The production implementation
//! (Stripe Checkout) lives in the infrastructure crate.

pub mod mock;

pub use mock::MockPaymentGateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::DomainError;

/// A single priced line on the hosted checkout page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name shown to the payer
    pub name: String,

    /// Short description shown under the name
    pub description: String,

    /// Amount in minor currency units (cents)
    pub unit_amount_cents: i64,

    /// Optional product image URL
    pub image: Option<String>,
}

/// Request to create a hosted checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// What is being paid for
    pub line_item: LineItem,

    /// Where the provider redirects after successful payment; may contain
    /// the provider's session-id placeholder
    pub success_url: String,

    /// Where the provider redirects if the payer abandons checkout
    pub cancel_url: String,

    /// Audit metadata attached to the session
    pub metadata: HashMap<String, String>,
}

/// A created hosted checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider-assigned session id
    pub id: String,

    /// URL the payer is redirected to
    pub url: String,
}

/// Payment state of a checkout session as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSessionStatus {
    /// Payment completed
    Paid,
    /// Payer has not completed payment yet
    Unpaid,
    /// No payment is required for the session
    NoPaymentRequired,
}

impl PaymentSessionStatus {
    /// Whether the session has been paid.
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentSessionStatus::Paid)
    }
}

/// Interface to the external payment provider
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted checkout session
    ///
    /// # Returns
    /// * `Ok(CheckoutSession)` - Session created, payer can be redirected
    /// * `Err(DomainError::Upstream)` - Provider unreachable or rejected the request
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CheckoutSession, DomainError>;

    /// Query the provider for a session's payment status
    async fn get_session_status(
        &self,
        session_id: &str,
    ) -> Result<PaymentSessionStatus, DomainError>;
}
