use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use se_core::domain::value_objects::{DatePeriod, Location};
use se_core::services::listing::{ListingDraft, ListingUpdate};

/// A date period on the wire; validated into a `DatePeriod` by the handler
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PeriodDto {
    /// Convert to a domain period, discarding empty or inverted ranges the
    /// way the listing update flow tolerates malformed blackouts.
    pub fn into_period(self) -> Option<DatePeriod> {
        DatePeriod::new(self.start_date, self.end_date)
    }
}

impl From<DatePeriod> for PeriodDto {
    fn from(period: DatePeriod) -> Self {
        Self {
            start_date: period.start_date,
            end_date: period.end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDto {
    pub address: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

impl From<LocationDto> for Location {
    fn from(dto: LocationDto) -> Self {
        Location::new(dto.address, dto.city, dto.country, dto.lat, dto.lng)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    /// Nightly price in cents
    #[validate(range(min = 1))]
    pub price_per_night_cents: i64,

    /// Cleaning fee in cents
    #[serde(default)]
    #[validate(range(min = 0))]
    pub cleaning_fee_cents: i64,

    #[serde(default = "default_one")]
    pub max_guests: u32,

    #[serde(default = "default_one")]
    pub bedrooms: u32,

    #[serde(default = "default_one")]
    pub bathrooms: u32,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    pub house_rules: Vec<String>,

    #[serde(default)]
    pub images: Vec<String>,

    /// Address and city presence is enforced by the listing service
    pub location: LocationDto,
}

impl CreateListingRequest {
    pub fn into_draft(self) -> ListingDraft {
        ListingDraft {
            title: self.title,
            description: self.description,
            price_per_night_cents: self.price_per_night_cents,
            cleaning_fee_cents: self.cleaning_fee_cents,
            max_guests: self.max_guests,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            amenities: self.amenities,
            house_rules: self.house_rules,
            images: self.images,
            location: self.location.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateListingRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    #[validate(range(min = 1))]
    pub price_per_night_cents: i64,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub cleaning_fee_cents: i64,

    #[serde(default = "default_one")]
    pub max_guests: u32,

    #[serde(default = "default_one")]
    pub bedrooms: u32,

    #[serde(default = "default_one")]
    pub bathrooms: u32,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    pub house_rules: Vec<String>,

    /// Images the host keeps plus any new uploads, in display order
    #[serde(default)]
    pub images: Vec<String>,

    /// Replacement blackout periods; invalid members are dropped
    #[serde(default)]
    pub availability: Option<Vec<PeriodDto>>,
}

impl UpdateListingRequest {
    pub fn into_update(self) -> ListingUpdate {
        ListingUpdate {
            title: self.title,
            description: self.description,
            price_per_night_cents: self.price_per_night_cents,
            cleaning_fee_cents: self.cleaning_fee_cents,
            max_guests: self.max_guests,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            amenities: self.amenities,
            house_rules: self.house_rules,
            images: self.images,
            availability: self.availability.map(|periods| {
                periods.into_iter().filter_map(PeriodDto::into_period).collect()
            }),
        }
    }
}

/// Query parameters for listing search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring match on the city
    pub location: Option<String>,
    /// Minimum guest capacity
    pub guests: Option<u32>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailablePeriodsResponse {
    pub periods: Vec<PeriodDto>,
}

fn default_one() -> u32 {
    1
}
