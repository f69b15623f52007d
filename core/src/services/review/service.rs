//! Review creation, listing and authorized deletion.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::review::Review;
use crate::domain::value_objects::ItemRef;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ListingRepository, ReviewRepository};

/// Service for review operations
pub struct ReviewService<R: ReviewRepository, L: ListingRepository> {
    review_repository: Arc<R>,
    listing_repository: Arc<L>,
}

impl<R: ReviewRepository, L: ListingRepository> ReviewService<R, L> {
    /// Create a new review service
    pub fn new(review_repository: Arc<R>, listing_repository: Arc<L>) -> Self {
        Self {
            review_repository,
            listing_repository,
        }
    }

    /// Create a review.
    ///
    /// Any authenticated user may review any item, and repeat reviews by
    /// the same user are allowed.
    pub async fn create_review(
        &self,
        user_id: Uuid,
        item: ItemRef,
        rating: i32,
        comment: String,
    ) -> DomainResult<Review> {
        if !(1..=5).contains(&rating) {
            return Err(DomainError::validation("rating must be between 1 and 5"));
        }
        if comment.trim().is_empty() {
            return Err(DomainError::validation("comment cannot be empty"));
        }

        let review = Review::new(user_id, item, rating, comment);
        self.review_repository.create(review).await
    }

    /// All reviews for an item, newest first.
    pub async fn list_reviews(&self, item: ItemRef) -> DomainResult<Vec<Review>> {
        self.review_repository.find_by_item(&item).await
    }

    /// Delete a review.
    ///
    /// Allowed for the author, and for the owner of the reviewed item. The
    /// owner is resolved per variant: listings resolve to their host;
    /// experiences and services have no owner registry in this deployment,
    /// so only the author may delete those reviews.
    pub async fn delete_review(&self, review_id: Uuid, requester_id: Uuid) -> DomainResult<()> {
        let review = self
            .review_repository
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review"))?;

        let authorized = review.is_authored_by(requester_id)
            || self.item_owner(&review.item).await? == Some(requester_id);

        if !authorized {
            return Err(DomainError::Unauthorized);
        }

        self.review_repository.delete(review_id).await?;
        info!(review_id = %review_id, requester_id = %requester_id, "Review deleted");
        Ok(())
    }

    /// Resolve the owner of the reviewed item, when one is registered.
    async fn item_owner(&self, item: &ItemRef) -> DomainResult<Option<Uuid>> {
        match item {
            ItemRef::Listing(listing_id) => Ok(self
                .listing_repository
                .find_by_id(*listing_id)
                .await?
                .map(|listing| listing.host_id)),
            // No experience or service registry to resolve owners against
            ItemRef::Experience(_) | ItemRef::Service(_) => Ok(None),
        }
    }
}
