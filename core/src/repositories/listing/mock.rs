//! Mock implementation of ListingRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::listing::Listing;
use crate::errors::DomainError;

use super::trait_::ListingRepository;

/// Mock listing repository backed by an in-memory map
pub struct MockListingRepository {
    listings: Arc<RwLock<HashMap<Uuid, Listing>>>,
}

impl MockListingRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            listings: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed the repository with a listing, bypassing create semantics
    pub async fn insert(&self, listing: Listing) {
        self.listings.write().await.insert(listing.id, listing);
    }
}

impl Default for MockListingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingRepository for MockListingRepository {
    async fn create(&self, listing: Listing) -> Result<Listing, DomainError> {
        let mut listings = self.listings.write().await;
        listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError> {
        let listings = self.listings.read().await;
        Ok(listings.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        let mut all: Vec<Listing> = listings.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        let mut owned: Vec<Listing> = listings
            .values()
            .filter(|l| l.host_id == host_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn search(
        &self,
        city: Option<&str>,
        min_guests: Option<u32>,
    ) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        let mut matched: Vec<Listing> = listings
            .values()
            .filter(|l| match city {
                Some(query) => l.location.city_matches(query),
                None => true,
            })
            .filter(|l| match min_guests {
                Some(guests) => l.max_guests >= guests,
                None => true,
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn update(&self, listing: Listing) -> Result<Listing, DomainError> {
        let mut listings = self.listings.write().await;

        if !listings.contains_key(&listing.id) {
            return Err(DomainError::not_found("Listing"));
        }

        listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut listings = self.listings.write().await;
        Ok(listings.remove(&id).is_some())
    }
}
