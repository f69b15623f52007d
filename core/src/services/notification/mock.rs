//! Mock mailer recording sends for assertions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::traits::Mailer;

/// A sent email captured by the mock
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body_text: String,
}

/// Mock mailer for testing
pub struct MockMailer {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    failures_remaining: Arc<RwLock<u32>>,
}

impl MockMailer {
    /// Create a mailer that always delivers
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            failures_remaining: Arc::new(RwLock::new(0)),
        }
    }

    /// Fail the next `count` sends before delivering again
    pub async fn fail_next(&self, count: u32) {
        *self.failures_remaining.write().await = count;
    }

    /// Emails delivered so far
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    /// Number of emails delivered so far
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body_text: &str,
        _body_html: &str,
    ) -> Result<String, DomainError> {
        let mut failures = self.failures_remaining.write().await;
        if *failures > 0 {
            *failures -= 1;
            return Err(DomainError::upstream("mail", "simulated delivery failure"));
        }

        let mut sent = self.sent.write().await;
        sent.push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body_text: body_text.to_string(),
        });
        Ok(format!("msg_{}", sent.len()))
    }
}
