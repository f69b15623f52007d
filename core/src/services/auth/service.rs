//! Signup, email verification and login.
//!
//! Signup stores the account unverified with a one-time code and enqueues
//! the verification email through the outbox; login is refused until the
//! code is confirmed. Credential failures are reported uniformly so the
//! endpoint does not leak which emails are registered.

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::user::{User, UserRole, OTP_LENGTH};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{OutboxRepository, UserRepository};
use crate::services::notification::templates;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Successful authentication result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Bearer access token
    pub access_token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// The authenticated user
    pub user: User,
}

/// Service for account signup, verification and login
pub struct AuthService<U: UserRepository, O: OutboxRepository> {
    user_repository: Arc<U>,
    outbox: Arc<O>,
    token_service: Arc<TokenService>,
    config: AuthServiceConfig,
}

impl<U: UserRepository, O: OutboxRepository> AuthService<U, O> {
    /// Create a new auth service
    pub fn new(
        user_repository: Arc<U>,
        outbox: Arc<O>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            outbox,
            token_service,
            config,
        }
    }

    /// Register a new account and enqueue the verification email.
    ///
    /// # Errors
    /// * `Auth(EmailAlreadyRegistered)` - email is taken
    /// * `Validation` - empty name or too-short password
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if password.len() < 8 {
            return Err(DomainError::validation(
                "password must be at least 8 characters",
            ));
        }

        let email = email.trim().to_lowercase();
        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = bcrypt::hash(password, self.config.bcrypt_cost)
            .map_err(|e| DomainError::Internal {
                message: format!("password hashing failed: {e}"),
            })?;

        let otp = Self::generate_otp();
        let user = User::new(
            name.trim().to_string(),
            email.clone(),
            password_hash,
            role,
            otp.clone(),
            self.config.otp_expiry_minutes,
        );
        let user = self.user_repository.create(user).await?;

        info!(user_id = %user.id, "Account registered, verification pending");

        // Enqueue failure must not fail signup; the worker retries queued mail.
        let email_notification = templates::verification_email(&user.email, &user.name, &otp);
        if let Err(e) = self.outbox.enqueue(email_notification).await {
            warn!(user_id = %user.id, error = %e, "Failed to enqueue verification email");
        }

        Ok(user)
    }

    /// Verify the emailed one-time code and issue the first access token.
    pub async fn verify_email(&self, email: &str, otp: &str) -> DomainResult<AuthTokens> {
        let email = email.trim().to_lowercase();
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        if user.is_verified {
            return Err(AuthError::AlreadyVerified.into());
        }

        let stored = user.otp.as_deref().unwrap_or_default();
        let matches = otp.len() == OTP_LENGTH
            && constant_time_eq(stored.as_bytes(), otp.as_bytes());
        if !matches || user.otp_expired(Utc::now()) {
            return Err(AuthError::InvalidVerificationCode.into());
        }

        let mut user = user;
        user.verify();
        let user = self.user_repository.update(user).await?;
        info!(user_id = %user.id, "Account verified");

        self.tokens_for(user)
    }

    /// Authenticate with email and password.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthTokens> {
        let email = email.trim().to_lowercase();
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_verified {
            return Err(AuthError::NotVerified.into());
        }

        let valid = bcrypt::verify(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "User logged in");
        self.tokens_for(user)
    }

    /// Fetch the authenticated user's profile.
    pub async fn profile(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    fn tokens_for(&self, user: User) -> DomainResult<AuthTokens> {
        let access_token = self.token_service.issue(&user)?;
        Ok(AuthTokens {
            access_token,
            expires_in: self.token_service.expires_in(),
            user,
        })
    }

    /// Six random decimal digits from the OS CSPRNG.
    fn generate_otp() -> String {
        let mut rng = OsRng;
        (0..OTP_LENGTH)
            .map(|_| char::from(b'0' + (rng.next_u32() % 10) as u8))
            .collect()
    }
}
