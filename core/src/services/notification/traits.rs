//! Mailer collaborator interface.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Interface to the outbound email provider.
///
/// Delivery is best-effort; the outbox worker owns retries, so
/// implementations should make a single attempt per call.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one email
    ///
    /// # Returns
    /// * `Ok(String)` - Provider message id
    /// * `Err(DomainError::Upstream)` - Provider unreachable or rejected the message
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body_text: &str,
        body_html: &str,
    ) -> Result<String, DomainError>;
}
