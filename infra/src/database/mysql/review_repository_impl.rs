//! MySQL implementation of the ReviewRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use se_core::domain::entities::review::Review;
use se_core::domain::value_objects::ItemRef;
use se_core::errors::DomainError;
use se_core::repositories::ReviewRepository;

/// MySQL implementation of ReviewRepository
pub struct MySqlReviewRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlReviewRepository {
    /// Create a new MySQL review repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Review entity
    fn row_to_review(row: &sqlx::mysql::MySqlRow) -> Result<Review, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("Failed to get id: {e}")))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::Database(format!("Failed to get user_id: {e}")))?;
        let item_type: String = row
            .try_get("item_type")
            .map_err(|e| DomainError::Database(format!("Failed to get item_type: {e}")))?;
        let item_id: String = row
            .try_get("item_id")
            .map_err(|e| DomainError::Database(format!("Failed to get item_id: {e}")))?;

        let item_id = Uuid::parse_str(&item_id)
            .map_err(|e| DomainError::Database(format!("Invalid UUID: {e}")))?;
        let item = ItemRef::from_parts(&item_type, item_id)
            .ok_or_else(|| DomainError::Database(format!("Unknown item type: {item_type}")))?;

        Ok(Review {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {e}")))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {e}")))?,
            item,
            rating: row
                .try_get("rating")
                .map_err(|e| DomainError::Database(format!("Failed to get rating: {e}")))?,
            comment: row
                .try_get("comment")
                .map_err(|e| DomainError::Database(format!("Failed to get comment: {e}")))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {e}")))?,
        })
    }
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    async fn create(&self, review: Review) -> Result<Review, DomainError> {
        let query = r#"
            INSERT INTO reviews (id, user_id, item_type, item_id, rating, comment, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(review.id.to_string())
            .bind(review.user_id.to_string())
            .bind(review.item.type_tag())
            .bind(review.item.item_id().to_string())
            .bind(review.rating)
            .bind(&review.comment)
            .bind(review.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to create review: {e}")))?;

        Ok(review)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let query = r#"
            SELECT id, user_id, item_type, item_id, rating, comment, created_at
            FROM reviews
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_review(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_item(&self, item: &ItemRef) -> Result<Vec<Review>, DomainError> {
        let query = r#"
            SELECT id, user_id, item_type, item_id, rating, comment, created_at
            FROM reviews
            WHERE item_type = ? AND item_id = ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(item.type_tag())
            .bind(item.item_id().to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_review).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to delete review: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
