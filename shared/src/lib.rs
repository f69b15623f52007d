//! Shared utilities and common types for the StayEasy server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - API response structures
//! - Utility functions (date validation, etc.)
//! - Common type definitions

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, PaymentConfig, ServerConfig,
};
pub use types::{ApiResponse, ErrorResponse, PaginatedResponse, Pagination};
pub use utils::validation;
