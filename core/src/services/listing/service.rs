//! Listing CRUD operations.
//!
//! Mutations are host-only: a non-owner gets `Unauthorized`, which the
//! caller can tell apart from `NotFound`.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::{DatePeriod, Location};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ListingRepository;

/// Fields required to publish a listing
#[derive(Debug, Clone)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price_per_night_cents: i64,
    pub cleaning_fee_cents: i64,
    pub max_guests: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub amenities: Vec<String>,
    pub house_rules: Vec<String>,
    pub images: Vec<String>,
    pub location: Location,
}

/// Fields a host may change on an existing listing
#[derive(Debug, Clone)]
pub struct ListingUpdate {
    pub title: String,
    pub description: String,
    pub price_per_night_cents: i64,
    pub cleaning_fee_cents: i64,
    pub max_guests: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub amenities: Vec<String>,
    pub house_rules: Vec<String>,
    /// Images the host keeps, in order, followed by any new uploads
    pub images: Vec<String>,
    /// Replacement blackout periods, when provided
    pub availability: Option<Vec<DatePeriod>>,
}

/// Service for listing CRUD
pub struct ListingService<L: ListingRepository> {
    listing_repository: Arc<L>,
}

impl<L: ListingRepository> ListingService<L> {
    /// Create a new listing service
    pub fn new(listing_repository: Arc<L>) -> Self {
        Self { listing_repository }
    }

    /// Publish a new listing owned by `host_id`.
    pub async fn create_listing(
        &self,
        host_id: Uuid,
        draft: ListingDraft,
    ) -> DomainResult<Listing> {
        Self::validate_fields(
            &draft.title,
            &draft.description,
            draft.price_per_night_cents,
            draft.cleaning_fee_cents,
        )?;
        if draft.location.address.trim().is_empty() || draft.location.city.trim().is_empty() {
            return Err(DomainError::validation("address and city are required"));
        }

        let mut listing = Listing::new(
            host_id,
            draft.title,
            draft.description,
            draft.price_per_night_cents,
            draft.location,
        );
        listing.cleaning_fee_cents = draft.cleaning_fee_cents;
        listing.max_guests = draft.max_guests.max(1);
        listing.bedrooms = draft.bedrooms.max(1);
        listing.bathrooms = draft.bathrooms.max(1);
        listing.amenities = draft.amenities;
        listing.house_rules = draft.house_rules;
        listing.images = draft.images;

        let listing = self.listing_repository.create(listing).await?;
        info!(listing_id = %listing.id, host_id = %host_id, "Listing created");
        Ok(listing)
    }

    /// Fetch a listing by id.
    pub async fn get_listing(&self, id: Uuid) -> DomainResult<Listing> {
        self.listing_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))
    }

    /// All published listings.
    pub async fn list_listings(&self) -> DomainResult<Vec<Listing>> {
        self.listing_repository.find_all().await
    }

    /// All listings owned by the host.
    pub async fn list_host_listings(&self, host_id: Uuid) -> DomainResult<Vec<Listing>> {
        self.listing_repository.find_by_host(host_id).await
    }

    /// Update a listing; only the owning host may do so.
    pub async fn update_listing(
        &self,
        id: Uuid,
        requester_id: Uuid,
        update: ListingUpdate,
    ) -> DomainResult<Listing> {
        let mut listing = self.get_listing(id).await?;
        if !listing.is_owned_by(requester_id) {
            return Err(DomainError::Unauthorized);
        }

        Self::validate_fields(
            &update.title,
            &update.description,
            update.price_per_night_cents,
            update.cleaning_fee_cents,
        )?;

        listing.title = update.title;
        listing.description = update.description;
        listing.price_per_night_cents = update.price_per_night_cents;
        listing.cleaning_fee_cents = update.cleaning_fee_cents;
        listing.max_guests = update.max_guests.max(1);
        listing.bedrooms = update.bedrooms.max(1);
        listing.bathrooms = update.bathrooms.max(1);
        listing.amenities = update.amenities;
        listing.house_rules = update.house_rules;
        listing.images = update.images;
        if let Some(periods) = update.availability {
            listing.set_availability(periods);
        } else {
            listing.updated_at = chrono::Utc::now();
        }

        self.listing_repository.update(listing).await
    }

    /// Delete a listing; only the owning host may do so.
    pub async fn delete_listing(&self, id: Uuid, requester_id: Uuid) -> DomainResult<()> {
        let listing = self.get_listing(id).await?;
        if !listing.is_owned_by(requester_id) {
            return Err(DomainError::Unauthorized);
        }

        self.listing_repository.delete(id).await?;
        info!(listing_id = %id, "Listing deleted");
        Ok(())
    }

    fn validate_fields(
        title: &str,
        description: &str,
        price_per_night_cents: i64,
        cleaning_fee_cents: i64,
    ) -> DomainResult<()> {
        if title.trim().is_empty() || description.trim().is_empty() {
            return Err(DomainError::validation("title and description are required"));
        }
        if price_per_night_cents <= 0 {
            return Err(DomainError::validation("price per night must be positive"));
        }
        if cleaning_fee_cents < 0 {
            return Err(DomainError::validation("cleaning fee cannot be negative"));
        }
        Ok(())
    }
}
