//! Listing entity representing a bookable stay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{DatePeriod, Location};

/// A stay published by a host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier for the listing
    pub id: Uuid,

    /// Host that owns the listing
    pub host_id: Uuid,

    /// Listing title shown in search results
    pub title: String,

    /// Long-form description
    pub description: String,

    /// Nightly price in minor currency units (cents)
    pub price_per_night_cents: i64,

    /// One-off cleaning fee in minor currency units (cents)
    pub cleaning_fee_cents: i64,

    /// Maximum number of guests the stay accommodates
    pub max_guests: u32,

    /// Number of bedrooms
    pub bedrooms: u32,

    /// Number of bathrooms
    pub bathrooms: u32,

    /// Amenity names
    pub amenities: Vec<String>,

    /// House rules in display order
    pub house_rules: Vec<String>,

    /// Image URLs in display order
    pub images: Vec<String>,

    /// Address and coordinates
    pub location: Location,

    /// Host-defined blackout periods during which the stay cannot be booked
    pub availability: Vec<DatePeriod>,

    /// Timestamp when the listing was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the listing was last updated
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Creates a new listing with no images, blackouts or extras.
    pub fn new(
        host_id: Uuid,
        title: String,
        description: String,
        price_per_night_cents: i64,
        location: Location,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            host_id,
            title,
            description,
            price_per_night_cents,
            cleaning_fee_cents: 0,
            max_guests: 1,
            bedrooms: 1,
            bathrooms: 1,
            amenities: Vec::new(),
            house_rules: Vec::new(),
            images: Vec::new(),
            location,
            availability: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the given user owns this listing.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.host_id == user_id
    }

    /// Total amount for a stay of `nights` nights, in cents.
    pub fn total_for_nights(&self, nights: i64) -> i64 {
        self.price_per_night_cents * nights + self.cleaning_fee_cents
    }

    /// Replaces the blackout periods, touching the update timestamp.
    pub fn set_availability(&mut self, periods: Vec<DatePeriod>) {
        self.availability = periods;
        self.updated_at = Utc::now();
    }
}
