//! Domain-specific error types and error handling.

use thiserror::Error;

// Re-export the shared response envelope for presentation layers
pub use se_shared::types::response::ErrorResponse;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired verification code")]
    InvalidVerificationCode,

    #[error("Account already verified")]
    AlreadyVerified,

    #[error("Account not verified")]
    NotVerified,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Upstream service failure: {service}: {message}")]
    Upstream { service: String, message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a missing resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for a conflicting state.
    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }

    /// Shorthand for an upstream collaborator failure.
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Stable code for client-side handling.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Conflict { .. } => "CONFLICT",
            DomainError::Unauthorized => "UNAUTHORIZED",
            DomainError::Upstream { .. } => "UPSTREAM_FAILURE",
            DomainError::Database(_) => "DATABASE_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(err) => match err {
                AuthError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
                AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
                AuthError::InvalidVerificationCode => "INVALID_VERIFICATION_CODE",
                AuthError::AlreadyVerified => "ALREADY_VERIFIED",
                AuthError::NotVerified => "NOT_VERIFIED",
            },
            DomainError::Token(err) => match err {
                TokenError::TokenExpired => "TOKEN_EXPIRED",
                TokenError::InvalidToken => "INVALID_TOKEN",
                TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            },
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
