//! Review entity for listings, experiences and services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ItemRef;

/// A review left by a user on a marketplace item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier for the review
    pub id: Uuid,

    /// Author of the review
    pub user_id: Uuid,

    /// Item the review targets
    #[serde(flatten)]
    pub item: ItemRef,

    /// Star rating, 1 to 5
    pub rating: i32,

    /// Review text, never empty
    pub comment: String,

    /// Timestamp when the review was created
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Creates a new review. The service layer has validated rating and comment.
    pub fn new(user_id: Uuid, item: ItemRef, rating: i32, comment: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            item,
            rating,
            comment,
            created_at: Utc::now(),
        }
    }

    /// Whether the given user wrote this review.
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
