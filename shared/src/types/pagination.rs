//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Maximum number of items a single page may request
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl Pagination {
    /// Create a new pagination with custom values
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1) * self.per_page
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

/// A page of results together with pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Total number of matching items
    pub total: u64,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub per_page: u32,
}

impl<T> PaginatedResponse<T> {
    /// Build a page from items and the query that produced it
    pub fn new(items: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
        }
    }

    /// Total number of pages
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        ((self.total + self.per_page as u64 - 1) / self.per_page as u64) as u32
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_calculation() {
        let p = Pagination::new(3, 20);
        assert_eq!(p.offset(), 40);
        assert_eq!(p.limit(), 20);
    }

    #[test]
    fn test_per_page_clamped() {
        let p = Pagination::new(1, 500);
        assert_eq!(p.per_page, MAX_PER_PAGE);
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 1);
    }

    #[test]
    fn test_total_pages() {
        let page = PaginatedResponse::new(vec![1, 2, 3], 41, &Pagination::new(1, 20));
        assert_eq!(page.total_pages(), 3);
    }
}
