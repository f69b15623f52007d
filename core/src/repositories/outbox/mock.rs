//! Mock implementation of OutboxRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::notification::{EmailNotification, NotificationStatus};
use crate::errors::DomainError;

use super::trait_::OutboxRepository;

/// Mock outbox repository for testing
///
/// Keeps an enqueue counter so idempotence tests can assert how many
/// notifications a flow produced.
pub struct MockOutboxRepository {
    notifications: Arc<RwLock<HashMap<Uuid, EmailNotification>>>,
    enqueue_count: Arc<RwLock<usize>>,
}

impl MockOutboxRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            notifications: Arc::new(RwLock::new(HashMap::new())),
            enqueue_count: Arc::new(RwLock::new(0)),
        }
    }

    /// Number of notifications enqueued since construction
    pub async fn enqueued(&self) -> usize {
        *self.enqueue_count.read().await
    }

    /// All notifications currently in the outbox
    pub async fn all(&self) -> Vec<EmailNotification> {
        let notifications = self.notifications.read().await;
        let mut all: Vec<EmailNotification> = notifications.values().cloned().collect();
        all.sort_by_key(|n| n.created_at);
        all
    }
}

impl Default for MockOutboxRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutboxRepository for MockOutboxRepository {
    async fn enqueue(
        &self,
        notification: EmailNotification,
    ) -> Result<EmailNotification, DomainError> {
        let mut notifications = self.notifications.write().await;
        notifications.insert(notification.id, notification.clone());
        *self.enqueue_count.write().await += 1;
        Ok(notification)
    }

    async fn fetch_due(
        &self,
        limit: u32,
        max_attempts: u32,
    ) -> Result<Vec<EmailNotification>, DomainError> {
        let notifications = self.notifications.read().await;
        let mut due: Vec<EmailNotification> = notifications
            .values()
            .filter(|n| n.status == NotificationStatus::Queued && n.attempts < max_attempts)
            .cloned()
            .collect();
        due.sort_by_key(|n| n.created_at);
        due.truncate(limit as usize);
        Ok(due)
    }

    async fn update(
        &self,
        notification: EmailNotification,
    ) -> Result<EmailNotification, DomainError> {
        let mut notifications = self.notifications.write().await;

        if !notifications.contains_key(&notification.id) {
            return Err(DomainError::not_found("EmailNotification"));
        }

        notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }
}
