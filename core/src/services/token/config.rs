//! Token service configuration.

/// Configuration for JWT access tokens
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret key for HS256 signing
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Issuer claim
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: String::from("change-me-in-production"),
            access_token_expiry: 86_400, // 24 hours
            issuer: String::from("stay-easy"),
        }
    }
}
