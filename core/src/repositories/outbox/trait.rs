//! Outbox repository trait for queued email notifications.

use async_trait::async_trait;

use crate::domain::entities::notification::EmailNotification;
use crate::errors::DomainError;

/// Repository trait for the email notification outbox
#[async_trait]
pub trait OutboxRepository: Send + Sync {
    /// Enqueue a notification for delivery
    async fn enqueue(
        &self,
        notification: EmailNotification,
    ) -> Result<EmailNotification, DomainError>;

    /// Queued notifications that still have delivery attempts left,
    /// oldest first, capped at `limit`
    async fn fetch_due(
        &self,
        limit: u32,
        max_attempts: u32,
    ) -> Result<Vec<EmailNotification>, DomainError>;

    /// Persist the delivery outcome recorded on the notification
    async fn update(
        &self,
        notification: EmailNotification,
    ) -> Result<EmailNotification, DomainError>;
}
