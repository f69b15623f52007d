//! Common validation utilities

use chrono::NaiveDate;

/// Check if a string is not empty after trimming
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if a string length is within bounds (inclusive)
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`)
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Check that a rating falls in the accepted 1..=5 range
pub fn valid_rating(rating: i32) -> bool {
    (1..=5).contains(&rating)
}

/// Normalize an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty() {
        assert!(not_empty("hello"));
        assert!(!not_empty("   "));
        assert!(!not_empty(""));
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2026-03-01"),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert!(parse_iso_date("03/01/2026").is_none());
        assert!(parse_iso_date("not-a-date").is_none());
    }

    #[test]
    fn test_valid_rating() {
        assert!(valid_rating(1));
        assert!(valid_rating(5));
        assert!(!valid_rating(0));
        assert!(!valid_rating(6));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Guest@Example.COM "), "guest@example.com");
    }
}
