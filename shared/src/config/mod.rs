//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Authentication and token configuration
//! - `database` - Database connection and pool configuration
//! - `email` - Outbound email provider configuration
//! - `payment` - Payment gateway and checkout URL configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod email;
pub mod payment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use payment::PaymentConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Payment gateway configuration
    pub payment: PaymentConfig,

    /// Email provider configuration
    pub email: EmailConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            payment: PaymentConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the complete configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            payment: PaymentConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }
}
