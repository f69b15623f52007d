//! MySQL implementation of the OutboxRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use se_core::domain::entities::notification::{EmailNotification, NotificationStatus};
use se_core::errors::DomainError;
use se_core::repositories::OutboxRepository;

/// MySQL implementation of OutboxRepository
pub struct MySqlOutboxRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOutboxRepository {
    /// Create a new MySQL outbox repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to EmailNotification entity
    fn row_to_notification(
        row: &sqlx::mysql::MySqlRow,
    ) -> Result<EmailNotification, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("Failed to get id: {e}")))?;

        let status_str: String = row
            .try_get("status")
            .map_err(|e| DomainError::Database(format!("Failed to get status: {e}")))?;
        let status = NotificationStatus::parse(&status_str)
            .ok_or_else(|| DomainError::Database(format!("Unknown status: {status_str}")))?;

        Ok(EmailNotification {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {e}")))?,
            recipient: row
                .try_get("recipient")
                .map_err(|e| DomainError::Database(format!("Failed to get recipient: {e}")))?,
            subject: row
                .try_get("subject")
                .map_err(|e| DomainError::Database(format!("Failed to get subject: {e}")))?,
            body_text: row
                .try_get("body_text")
                .map_err(|e| DomainError::Database(format!("Failed to get body_text: {e}")))?,
            body_html: row
                .try_get("body_html")
                .map_err(|e| DomainError::Database(format!("Failed to get body_html: {e}")))?,
            status,
            attempts: row
                .try_get("attempts")
                .map_err(|e| DomainError::Database(format!("Failed to get attempts: {e}")))?,
            last_error: row
                .try_get("last_error")
                .map_err(|e| DomainError::Database(format!("Failed to get last_error: {e}")))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {e}")))?,
            sent_at: row
                .try_get::<Option<DateTime<Utc>>, _>("sent_at")
                .map_err(|e| DomainError::Database(format!("Failed to get sent_at: {e}")))?,
        })
    }
}

#[async_trait]
impl OutboxRepository for MySqlOutboxRepository {
    async fn enqueue(
        &self,
        notification: EmailNotification,
    ) -> Result<EmailNotification, DomainError> {
        let query = r#"
            INSERT INTO email_outbox (id, recipient, subject, body_text, body_html, status,
                                      attempts, last_error, created_at, sent_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(notification.id.to_string())
            .bind(&notification.recipient)
            .bind(&notification.subject)
            .bind(&notification.body_text)
            .bind(&notification.body_html)
            .bind(notification.status.as_str())
            .bind(notification.attempts)
            .bind(&notification.last_error)
            .bind(notification.created_at)
            .bind(notification.sent_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to enqueue notification: {e}")))?;

        Ok(notification)
    }

    async fn fetch_due(
        &self,
        limit: u32,
        max_attempts: u32,
    ) -> Result<Vec<EmailNotification>, DomainError> {
        let query = r#"
            SELECT id, recipient, subject, body_text, body_html, status, attempts,
                   last_error, created_at, sent_at
            FROM email_outbox
            WHERE status = 'queued' AND attempts < ?
            ORDER BY created_at ASC
            LIMIT ?
        "#;

        let rows = sqlx::query(query)
            .bind(max_attempts)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_notification).collect()
    }

    async fn update(
        &self,
        notification: EmailNotification,
    ) -> Result<EmailNotification, DomainError> {
        let query = r#"
            UPDATE email_outbox
            SET status = ?, attempts = ?, last_error = ?, sent_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(notification.status.as_str())
            .bind(notification.attempts)
            .bind(&notification.last_error)
            .bind(notification.sent_at)
            .bind(notification.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to update notification: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("EmailNotification"));
        }

        Ok(notification)
    }
}
