use serde::{Deserialize, Serialize};
use validator::Validate;

use se_core::domain::entities::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Email address the verification code is sent to
    #[validate(email)]
    pub email: String,

    /// Plain password; hashed before storage
    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Account role: "guest", "host" or "service_provider"
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email)]
    pub email: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
}
