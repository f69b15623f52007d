//! Mock implementation of ReviewRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::review::Review;
use crate::domain::value_objects::ItemRef;
use crate::errors::DomainError;

use super::trait_::ReviewRepository;

/// Mock review repository for testing
pub struct MockReviewRepository {
    reviews: Arc<RwLock<HashMap<Uuid, Review>>>,
}

impl MockReviewRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            reviews: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockReviewRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewRepository for MockReviewRepository {
    async fn create(&self, review: Review) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;
        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(&id).cloned())
    }

    async fn find_by_item(&self, item: &ItemRef) -> Result<Vec<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        let mut matched: Vec<Review> = reviews
            .values()
            .filter(|r| r.item == *item)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut reviews = self.reviews.write().await;
        Ok(reviews.remove(&id).is_some())
    }
}
