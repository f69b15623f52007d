//! Review repository trait defining the interface for review persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::review::Review;
use crate::domain::value_objects::ItemRef;
use crate::errors::DomainError;

/// Repository trait for Review entity persistence operations
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a new review
    async fn create(&self, review: Review) -> Result<Review, DomainError>;

    /// Find a review by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError>;

    /// All reviews for the given item, newest first
    async fn find_by_item(&self, item: &ItemRef) -> Result<Vec<Review>, DomainError>;

    /// Delete a review
    ///
    /// # Returns
    /// * `Ok(true)` - Review was deleted
    /// * `Ok(false)` - Review not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
