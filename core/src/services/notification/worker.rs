//! Outbox worker draining queued notifications.
//!
//! A background task that periodically fetches queued emails and hands them
//! to the mailer. Failures are recorded on the row and retried on later
//! ticks until the attempt cap; the request path that enqueued the email is
//! never blocked or failed by delivery problems.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::OutboxRepository;

use super::traits::Mailer;

/// Configuration for the outbox worker
#[derive(Debug, Clone)]
pub struct OutboxWorkerConfig {
    /// How often to poll the outbox (in seconds)
    pub interval_seconds: u64,
    /// Maximum notifications to process per tick
    pub batch_size: u32,
    /// Maximum delivery attempts per notification
    pub max_attempts: u32,
    /// Whether the worker is enabled
    pub enabled: bool,
}

impl Default for OutboxWorkerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 15,
            batch_size: 50,
            max_attempts: 5,
            enabled: true,
        }
    }
}

/// Summary of one worker tick
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DrainResult {
    /// Notifications delivered this tick
    pub delivered: usize,
    /// Notifications that failed this tick (will retry until the cap)
    pub failed: usize,
}

/// Worker that drains the email outbox
pub struct OutboxWorker<O: OutboxRepository, M: Mailer> {
    outbox: Arc<O>,
    mailer: Arc<M>,
    config: OutboxWorkerConfig,
}

impl<O: OutboxRepository, M: Mailer> OutboxWorker<O, M> {
    /// Create a new outbox worker
    pub fn new(outbox: Arc<O>, mailer: Arc<M>, config: OutboxWorkerConfig) -> Self {
        Self {
            outbox,
            mailer,
            config,
        }
    }

    /// Run a single drain cycle
    pub async fn run_once(&self) -> Result<DrainResult, DomainError> {
        if !self.config.enabled {
            return Ok(DrainResult::default());
        }

        let due = self
            .outbox
            .fetch_due(self.config.batch_size, self.config.max_attempts)
            .await?;

        let mut result = DrainResult::default();
        for mut notification in due {
            let send = self
                .mailer
                .send(
                    &notification.recipient,
                    &notification.subject,
                    &notification.body_text,
                    &notification.body_html,
                )
                .await;

            match send {
                Ok(message_id) => {
                    notification.mark_sent();
                    result.delivered += 1;
                    info!(
                        notification_id = %notification.id,
                        message_id = %message_id,
                        "Delivered queued notification"
                    );
                }
                Err(e) => {
                    notification.record_failure(e.to_string(), self.config.max_attempts);
                    result.failed += 1;
                    warn!(
                        notification_id = %notification.id,
                        attempts = notification.attempts,
                        error = %e,
                        "Notification delivery failed"
                    );
                }
            }

            if let Err(e) = self.outbox.update(notification).await {
                // The next tick will re-fetch the row and may re-send;
                // duplicate delivery is preferable to silent loss.
                error!(error = %e, "Failed to persist notification outcome");
            }
        }

        Ok(result)
    }

    /// Run the worker loop until the task is aborted
    pub async fn run(&self) {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(self.config.interval_seconds));
        loop {
            interval.tick().await;
            if let Err(e) = self.run_once().await {
                error!(error = %e, "Outbox drain cycle failed");
            }
        }
    }
}
