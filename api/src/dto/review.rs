use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use se_core::domain::entities::review::Review;
use se_core::domain::value_objects::ItemRef;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    /// "listing", "experience" or "service"
    pub item_type: String,

    pub item_id: Uuid,

    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(min = 1, max = 2000))]
    pub comment: String,
}

impl CreateReviewRequest {
    /// Resolve the typed item reference; `None` for an unknown item type.
    pub fn item_ref(&self) -> Option<ItemRef> {
        ItemRef::from_parts(&self.item_type, self.item_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub review: Review,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewListResponse {
    pub reviews: Vec<Review>,
}
