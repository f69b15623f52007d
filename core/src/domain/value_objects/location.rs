//! Geographic location of a listing.

use serde::{Deserialize, Serialize};

/// Street address and coordinates for a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Street address
    pub address: String,

    /// City name, used for search matching
    pub city: String,

    /// Country name
    pub country: String,

    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lng: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            country: country.into(),
            lat,
            lng,
        }
    }

    /// Case-insensitive substring match on the city name.
    pub fn city_matches(&self, query: &str) -> bool {
        self.city.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_matches_is_case_insensitive_substring() {
        let location = Location::new("1 Harbour St", "Sydney", "Australia", -33.86, 151.21);
        assert!(location.city_matches("syd"));
        assert!(location.city_matches("SYDNEY"));
        assert!(!location.city_matches("melbourne"));
    }
}
