//! Domain-error-to-HTTP mapping.
//!
//! All handlers funnel failures through [`error_response`] so every error
//! leaves the API with the same envelope and a status code derived from the
//! error taxonomy, not from individual handlers.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use std::collections::HashMap;

use se_core::errors::{AuthError, DomainError, TokenError};
use se_shared::types::response::ErrorResponse;

/// HTTP status for a domain error.
fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::Unauthorized => StatusCode::FORBIDDEN,
        DomainError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        DomainError::Database(_) | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Auth(auth) => match auth {
            AuthError::EmailAlreadyRegistered => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidVerificationCode | AuthError::AlreadyVerified => {
                StatusCode::BAD_REQUEST
            }
            AuthError::NotVerified => StatusCode::FORBIDDEN,
        },
        DomainError::Token(token) => match token {
            TokenError::TokenExpired | TokenError::InvalidToken => StatusCode::UNAUTHORIZED,
            TokenError::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

/// Build the error response for a domain error.
pub fn error_response(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status.is_server_error() {
        log::error!("Request failed: {error}");
    } else {
        log::debug!("Request rejected: {error}");
    }

    // Internal details stay in the logs
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        "Internal server error".to_string()
    } else {
        error.to_string()
    };

    HttpResponse::build(status).json(ErrorResponse::new(error.code(), message))
}

/// Build the response for DTO validation failures.
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), serde_json::json!(messages));
    }

    HttpResponse::BadRequest().json(
        ErrorResponse::new("VALIDATION_ERROR", "Invalid request data").with_details(details),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&DomainError::not_found("Listing")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::conflict("dates taken")),
            StatusCode::CONFLICT
        );
        assert_eq!(status_for(&DomainError::Unauthorized), StatusCode::FORBIDDEN);
        assert_eq!(
            status_for(&DomainError::upstream("stripe", "down")),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&DomainError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&DomainError::Database("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
