//! JWT access token service.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Claims carried in an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Role the account was registered with
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID, unique per issued token
    pub jti: String,
}

impl Claims {
    /// Parses the subject into the user id.
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidToken)
    }

    /// Parses the role claim.
    pub fn user_role(&self) -> Result<UserRole, TokenError> {
        UserRole::parse(&self.role).ok_or(TokenError::InvalidToken)
    }
}

/// Issues and verifies HS256 access tokens
pub struct TokenService {
    config: TokenServiceConfig,
}

impl TokenService {
    /// Create a new token service
    pub fn new(config: TokenServiceConfig) -> Self {
        Self { config }
    }

    /// Issue an access token for the user.
    pub fn issue(&self, user: &User) -> DomainResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.as_str().to_string(),
            iat: now,
            exp: now + self.config.access_token_expiry,
            iss: self.config.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|_| TokenError::TokenGenerationFailed.into())
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            _ => TokenError::InvalidToken,
        })?;

        Ok(data.claims)
    }

    /// Access token lifetime in seconds, exposed for API responses.
    pub fn expires_in(&self) -> i64 {
        self.config.access_token_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    fn sample_user() -> User {
        User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "$2b$12$hash".to_string(),
            UserRole::Host,
            "123456".to_string(),
            10,
        )
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = TokenService::new(TokenServiceConfig::default());
        let user = sample_user();

        let token = service.issue(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.user_role().unwrap(), UserRole::Host);
        assert_eq!(claims.iss, "stay-easy");
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issuer = TokenService::new(TokenServiceConfig {
            secret: "secret-a".to_string(),
            ..Default::default()
        });
        let verifier = TokenService::new(TokenServiceConfig {
            secret: "secret-b".to_string(),
            ..Default::default()
        });

        let token = issuer.issue(&sample_user()).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(DomainError::Token(TokenError::InvalidToken))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = TokenService::new(TokenServiceConfig {
            access_token_expiry: -120,
            ..Default::default()
        });

        let token = service.issue(&sample_user()).unwrap();
        assert!(matches!(
            service.verify(&token),
            Err(DomainError::Token(TokenError::TokenExpired))
        ));
    }

    #[test]
    fn test_tokens_have_unique_jti() {
        let service = TokenService::new(TokenServiceConfig::default());
        let user = sample_user();

        let first = service.verify(&service.issue(&user).unwrap()).unwrap();
        let second = service.verify(&service.issue(&user).unwrap()).unwrap();
        assert_ne!(first.jti, second.jti);
    }
}
