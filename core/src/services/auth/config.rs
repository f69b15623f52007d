//! Auth service configuration.

/// Configuration for signup and verification
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Verification code lifetime in minutes
    pub otp_expiry_minutes: i64,

    /// bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            otp_expiry_minutes: 10,
            bcrypt_cost: 12,
        }
    }
}

impl AuthServiceConfig {
    /// Low-cost configuration for tests
    pub fn fast_for_tests() -> Self {
        Self {
            bcrypt_cost: 4,
            ..Default::default()
        }
    }
}
