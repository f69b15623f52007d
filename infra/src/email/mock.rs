//! Logging mailer for local development.
//!
//! Pretends every send succeeds and logs the message instead of delivering
//! it, so the full signup and booking flows can run without a mail account.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use se_core::errors::DomainError;
use se_core::services::notification::Mailer;

/// Mailer that logs instead of sending
pub struct LoggingMailer {
    counter: AtomicU64,
}

impl LoggingMailer {
    /// Create a new logging mailer
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for LoggingMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body_text: &str,
        _body_html: &str,
    ) -> Result<String, DomainError> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        info!(to, subject, body = body_text, "MOCK EMAIL (not delivered)");
        Ok(format!("mock-{n}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_mailer_returns_sequential_ids() {
        let mailer = LoggingMailer::new();
        let first = mailer.send("a@example.com", "s", "t", "<p>h</p>").await.unwrap();
        let second = mailer.send("b@example.com", "s", "t", "<p>h</p>").await.unwrap();
        assert_eq!(first, "mock-1");
        assert_eq!(second, "mock-2");
    }
}
