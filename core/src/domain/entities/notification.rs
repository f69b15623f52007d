//! Outbox entry for outbound email notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery state of an outbox entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Waiting for the worker to pick it up (or to retry it)
    Queued,
    /// Delivered to the mail provider
    Sent,
    /// Gave up after exhausting delivery attempts
    Failed,
}

impl NotificationStatus {
    /// Stable tag used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Queued => "queued",
            NotificationStatus::Sent => "sent",
            NotificationStatus::Failed => "failed",
        }
    }

    /// Parses the storage tag back into a status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "queued" => Some(NotificationStatus::Queued),
            "sent" => Some(NotificationStatus::Sent),
            "failed" => Some(NotificationStatus::Failed),
            _ => None,
        }
    }
}

/// A queued email, written in the same logical step as the state change
/// that caused it and drained by the outbox worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailNotification {
    /// Unique identifier for the notification
    pub id: Uuid,

    /// Recipient email address
    pub recipient: String,

    /// Subject line
    pub subject: String,

    /// Plain-text body
    pub body_text: String,

    /// HTML body
    pub body_html: String,

    /// Delivery state
    pub status: NotificationStatus,

    /// Number of delivery attempts made so far
    pub attempts: u32,

    /// Error from the most recent failed attempt
    pub last_error: Option<String>,

    /// Timestamp when the notification was enqueued
    pub created_at: DateTime<Utc>,

    /// Timestamp of successful delivery
    pub sent_at: Option<DateTime<Utc>>,
}

impl EmailNotification {
    /// Creates a queued notification.
    pub fn new(recipient: String, subject: String, body_text: String, body_html: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            subject,
            body_text,
            body_html,
            status: NotificationStatus::Queued,
            attempts: 0,
            last_error: None,
            created_at: Utc::now(),
            sent_at: None,
        }
    }

    /// Records a successful delivery.
    pub fn mark_sent(&mut self) {
        self.status = NotificationStatus::Sent;
        self.sent_at = Some(Utc::now());
    }

    /// Records a failed attempt; flips to `Failed` once the cap is reached.
    pub fn record_failure(&mut self, error: impl Into<String>, max_attempts: u32) {
        self.attempts += 1;
        self.last_error = Some(error.into());
        if self.attempts >= max_attempts {
            self.status = NotificationStatus::Failed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EmailNotification {
        EmailNotification::new(
            "guest@example.com".to_string(),
            "Booking Confirmed".to_string(),
            "Your stay is confirmed.".to_string(),
            "<p>Your stay is confirmed.</p>".to_string(),
        )
    }

    #[test]
    fn test_new_notification_is_queued() {
        let notification = sample();
        assert_eq!(notification.status, NotificationStatus::Queued);
        assert_eq!(notification.attempts, 0);
        assert!(notification.sent_at.is_none());
    }

    #[test]
    fn test_mark_sent() {
        let mut notification = sample();
        notification.mark_sent();
        assert_eq!(notification.status, NotificationStatus::Sent);
        assert!(notification.sent_at.is_some());
    }

    #[test]
    fn test_failure_keeps_queued_until_cap() {
        let mut notification = sample();
        notification.record_failure("timeout", 3);
        notification.record_failure("timeout", 3);
        assert_eq!(notification.status, NotificationStatus::Queued);
        assert_eq!(notification.attempts, 2);
        notification.record_failure("timeout", 3);
        assert_eq!(notification.status, NotificationStatus::Failed);
        assert_eq!(notification.last_error.as_deref(), Some("timeout"));
    }
}
