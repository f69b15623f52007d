//! User entity representing a registered account in the StayEasy system.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the email verification code
pub const OTP_LENGTH: usize = 6;

/// Default lifetime of a verification code in minutes
pub const OTP_EXPIRY_MINUTES: i64 = 10;

/// Role a user acts under in the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// A traveler booking stays
    Guest,
    /// A host publishing listings
    Host,
    /// A provider offering add-on services
    ServiceProvider,
    /// Marketplace administrator
    Admin,
}

impl UserRole {
    /// Stable tag used in storage and JWT claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Guest => "guest",
            UserRole::Host => "host",
            UserRole::ServiceProvider => "service_provider",
            UserRole::Admin => "admin",
        }
    }

    /// Parses the storage tag back into a role.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "guest" => Some(UserRole::Guest),
            "host" => Some(UserRole::Host),
            "service_provider" => Some(UserRole::ServiceProvider),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, stored lowercase and unique
    pub email: String,

    /// bcrypt hash of the password; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Role the account was registered with
    pub role: UserRole,

    /// Avatar image URL
    pub avatar: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,

    /// Short profile bio
    pub bio: Option<String>,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Pending verification code, cleared once used
    #[serde(skip_serializing, default)]
    pub otp: Option<String>,

    /// When the pending verification code expires
    #[serde(skip_serializing, default)]
    pub otp_expires_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user with a pending verification code.
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        role: UserRole,
        otp: String,
        otp_expiry_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            avatar: None,
            phone: None,
            bio: None,
            is_verified: false,
            otp: Some(otp),
            otp_expires_at: Some(now + Duration::minutes(otp_expiry_minutes)),
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the account verified and clears the pending code.
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.otp = None;
        self.otp_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Whether the pending verification code has lapsed.
    pub fn otp_expired(&self, now: DateTime<Utc>) -> bool {
        match self.otp_expires_at {
            Some(expires_at) => expires_at < now,
            None => true,
        }
    }

    /// Checks if the user is a host.
    pub fn is_host(&self) -> bool {
        matches!(self.role, UserRole::Host)
    }
}
