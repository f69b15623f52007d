//! MySQL implementation of the ListingRepository trait.
//!
//! Variable-length collections (amenities, house rules, images, blackout
//! periods) are stored as JSON columns; the location is flattened into
//! scalar columns so the city can be matched in SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use se_core::domain::entities::listing::Listing;
use se_core::domain::value_objects::{DatePeriod, Location};
use se_core::errors::DomainError;
use se_core::repositories::ListingRepository;

/// MySQL implementation of ListingRepository
pub struct MySqlListingRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlListingRepository {
    /// Create a new MySQL listing repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn json_column<T: serde::de::DeserializeOwned>(
        row: &sqlx::mysql::MySqlRow,
        column: &str,
    ) -> Result<T, DomainError> {
        let raw: String = row
            .try_get(column)
            .map_err(|e| DomainError::Database(format!("Failed to get {column}: {e}")))?;
        serde_json::from_str(&raw)
            .map_err(|e| DomainError::Database(format!("Invalid JSON in {column}: {e}")))
    }

    /// Convert database row to Listing entity
    fn row_to_listing(row: &sqlx::mysql::MySqlRow) -> Result<Listing, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("Failed to get id: {e}")))?;
        let host_id: String = row
            .try_get("host_id")
            .map_err(|e| DomainError::Database(format!("Failed to get host_id: {e}")))?;

        let location = Location {
            address: row
                .try_get("address")
                .map_err(|e| DomainError::Database(format!("Failed to get address: {e}")))?,
            city: row
                .try_get("city")
                .map_err(|e| DomainError::Database(format!("Failed to get city: {e}")))?,
            country: row
                .try_get("country")
                .map_err(|e| DomainError::Database(format!("Failed to get country: {e}")))?,
            lat: row
                .try_get("lat")
                .map_err(|e| DomainError::Database(format!("Failed to get lat: {e}")))?,
            lng: row
                .try_get("lng")
                .map_err(|e| DomainError::Database(format!("Failed to get lng: {e}")))?,
        };

        Ok(Listing {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {e}")))?,
            host_id: Uuid::parse_str(&host_id)
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {e}")))?,
            title: row
                .try_get("title")
                .map_err(|e| DomainError::Database(format!("Failed to get title: {e}")))?,
            description: row
                .try_get("description")
                .map_err(|e| DomainError::Database(format!("Failed to get description: {e}")))?,
            price_per_night_cents: row
                .try_get("price_per_night_cents")
                .map_err(|e| {
                    DomainError::Database(format!("Failed to get price_per_night_cents: {e}"))
                })?,
            cleaning_fee_cents: row
                .try_get("cleaning_fee_cents")
                .map_err(|e| {
                    DomainError::Database(format!("Failed to get cleaning_fee_cents: {e}"))
                })?,
            max_guests: row
                .try_get("max_guests")
                .map_err(|e| DomainError::Database(format!("Failed to get max_guests: {e}")))?,
            bedrooms: row
                .try_get("bedrooms")
                .map_err(|e| DomainError::Database(format!("Failed to get bedrooms: {e}")))?,
            bathrooms: row
                .try_get("bathrooms")
                .map_err(|e| DomainError::Database(format!("Failed to get bathrooms: {e}")))?,
            amenities: Self::json_column(row, "amenities")?,
            house_rules: Self::json_column(row, "house_rules")?,
            images: Self::json_column(row, "images")?,
            location,
            availability: Self::json_column::<Vec<DatePeriod>>(row, "availability")?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {e}")))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database(format!("Failed to get updated_at: {e}")))?,
        })
    }

    fn encode_json<T: serde::Serialize>(value: &T) -> Result<String, DomainError> {
        serde_json::to_string(value)
            .map_err(|e| DomainError::Database(format!("JSON encoding failed: {e}")))
    }
}

const LISTING_COLUMNS: &str = r#"id, host_id, title, description, price_per_night_cents,
       cleaning_fee_cents, max_guests, bedrooms, bathrooms, amenities, house_rules,
       images, address, city, country, lat, lng, availability, created_at, updated_at"#;

#[async_trait]
impl ListingRepository for MySqlListingRepository {
    async fn create(&self, listing: Listing) -> Result<Listing, DomainError> {
        let query = r#"
            INSERT INTO listings (id, host_id, title, description, price_per_night_cents,
                                  cleaning_fee_cents, max_guests, bedrooms, bathrooms,
                                  amenities, house_rules, images, address, city, country,
                                  lat, lng, availability, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(listing.id.to_string())
            .bind(listing.host_id.to_string())
            .bind(&listing.title)
            .bind(&listing.description)
            .bind(listing.price_per_night_cents)
            .bind(listing.cleaning_fee_cents)
            .bind(listing.max_guests)
            .bind(listing.bedrooms)
            .bind(listing.bathrooms)
            .bind(Self::encode_json(&listing.amenities)?)
            .bind(Self::encode_json(&listing.house_rules)?)
            .bind(Self::encode_json(&listing.images)?)
            .bind(&listing.location.address)
            .bind(&listing.location.city)
            .bind(&listing.location.country)
            .bind(listing.location.lat)
            .bind(listing.location.lng)
            .bind(Self::encode_json(&listing.availability)?)
            .bind(listing.created_at)
            .bind(listing.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to create listing: {e}")))?;

        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError> {
        let query = format!("SELECT {LISTING_COLUMNS} FROM listings WHERE id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_listing(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Listing>, DomainError> {
        let query = format!("SELECT {LISTING_COLUMNS} FROM listings ORDER BY created_at DESC");

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_listing).collect()
    }

    async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Listing>, DomainError> {
        let query = format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE host_id = ? ORDER BY created_at DESC"
        );

        let rows = sqlx::query(&query)
            .bind(host_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_listing).collect()
    }

    async fn search(
        &self,
        city: Option<&str>,
        min_guests: Option<u32>,
    ) -> Result<Vec<Listing>, DomainError> {
        let mut query = format!("SELECT {LISTING_COLUMNS} FROM listings WHERE 1 = 1");
        if city.is_some() {
            query.push_str(" AND LOWER(city) LIKE ?");
        }
        if min_guests.is_some() {
            query.push_str(" AND max_guests >= ?");
        }
        query.push_str(" ORDER BY created_at DESC");

        let mut q = sqlx::query(&query);
        if let Some(city) = city {
            q = q.bind(format!("%{}%", city.to_lowercase()));
        }
        if let Some(min_guests) = min_guests {
            q = q.bind(min_guests);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_listing).collect()
    }

    async fn update(&self, listing: Listing) -> Result<Listing, DomainError> {
        let query = r#"
            UPDATE listings
            SET title = ?, description = ?, price_per_night_cents = ?, cleaning_fee_cents = ?,
                max_guests = ?, bedrooms = ?, bathrooms = ?, amenities = ?, house_rules = ?,
                images = ?, address = ?, city = ?, country = ?, lat = ?, lng = ?,
                availability = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&listing.title)
            .bind(&listing.description)
            .bind(listing.price_per_night_cents)
            .bind(listing.cleaning_fee_cents)
            .bind(listing.max_guests)
            .bind(listing.bedrooms)
            .bind(listing.bathrooms)
            .bind(Self::encode_json(&listing.amenities)?)
            .bind(Self::encode_json(&listing.house_rules)?)
            .bind(Self::encode_json(&listing.images)?)
            .bind(&listing.location.address)
            .bind(&listing.location.city)
            .bind(&listing.location.country)
            .bind(listing.location.lat)
            .bind(listing.location.lng)
            .bind(Self::encode_json(&listing.availability)?)
            .bind(listing.updated_at)
            .bind(listing.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to update listing: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Listing"));
        }

        Ok(listing)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM listings WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to delete listing: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
