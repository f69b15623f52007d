//! Listing repository trait defining the interface for listing persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::listing::Listing;
use crate::errors::DomainError;

/// Repository trait for Listing entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persist a new listing
    ///
    /// # Returns
    /// * `Ok(Listing)` - The created listing
    /// * `Err(DomainError)` - Creation failed
    async fn create(&self, listing: Listing) -> Result<Listing, DomainError>;

    /// Find a listing by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Listing))` - Listing found
    /// * `Ok(None)` - No listing with the given id
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError>;

    /// All published listings, newest first
    async fn find_all(&self) -> Result<Vec<Listing>, DomainError>;

    /// All listings owned by the given host, newest first
    async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Listing>, DomainError>;

    /// Listings matching the search criteria
    ///
    /// # Arguments
    /// * `city` - Case-insensitive substring match on the city name
    /// * `min_guests` - Minimum guest capacity
    ///
    /// Absent criteria are no-ops: every listing passes them.
    async fn search(
        &self,
        city: Option<&str>,
        min_guests: Option<u32>,
    ) -> Result<Vec<Listing>, DomainError>;

    /// Replace an existing listing
    ///
    /// # Returns
    /// * `Ok(Listing)` - The updated listing
    /// * `Err(DomainError::NotFound)` - No listing with the given id
    async fn update(&self, listing: Listing) -> Result<Listing, DomainError>;

    /// Delete a listing
    ///
    /// # Returns
    /// * `Ok(true)` - Listing was deleted
    /// * `Ok(false)` - Listing not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
