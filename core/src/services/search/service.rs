//! Search filter combining listing criteria with booking conflicts.

use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::DatePeriod;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BookingRepository, ListingRepository};

/// Optional search criteria; absent filters are no-ops
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Case-insensitive substring match on the city name
    pub city: Option<String>,

    /// Minimum guest capacity
    pub guests: Option<u32>,

    /// Desired stay, both ends or neither
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

/// Service for searching listings
pub struct SearchService<L: ListingRepository, B: BookingRepository> {
    listing_repository: Arc<L>,
    booking_repository: Arc<B>,
}

impl<L: ListingRepository, B: BookingRepository> SearchService<L, B> {
    /// Create a new search service
    pub fn new(listing_repository: Arc<L>, booking_repository: Arc<B>) -> Self {
        Self {
            listing_repository,
            booking_repository,
        }
    }

    /// Listings matching the filters, with any listing blocked for the
    /// requested range excluded.
    ///
    /// A listing counts as blocked when a `paid` booking or an unexpired
    /// `pending` hold overlaps the range; host blackouts only surface on
    /// the listing calendar.
    pub async fn search(&self, filters: SearchFilters) -> DomainResult<Vec<Listing>> {
        let city = filters.city.as_deref().filter(|c| !c.trim().is_empty());
        let mut listings = self
            .listing_repository
            .search(city, filters.guests)
            .await?;

        let period = match (filters.check_in, filters.check_out) {
            (Some(check_in), Some(check_out)) => {
                Some(DatePeriod::new(check_in, check_out).ok_or_else(|| {
                    DomainError::validation("check-out must be after check-in")
                })?)
            }
            (None, None) => None,
            _ => {
                return Err(DomainError::validation(
                    "both check-in and check-out are required for date filtering",
                ))
            }
        };

        if let Some(period) = period {
            let blocked: HashSet<_> = self
                .booking_repository
                .find_blocked_listing_ids(&period, Utc::now())
                .await?
                .into_iter()
                .collect();
            listings.retain(|listing| !blocked.contains(&listing.id));
        }

        Ok(listings)
    }
}
