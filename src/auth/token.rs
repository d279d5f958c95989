use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Secret;

/// Lifetime of every session token
pub const TOKEN_TTL_MINUTES: i64 = 30;

/// Signed payload of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity the token was issued for
    pub email: String,
    /// Absolute expiry, seconds since the Unix epoch
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Signing key is not configured")]
    EmptyKey,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Token rejected: {0}")]
    Invalid(String),

    #[error("Token expired")]
    Expired,
}

/// Expiry for a token issued at `issued_at`
pub fn token_expiry(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::minutes(TOKEN_TTL_MINUTES)
}

/// Signs session tokens with the process-wide HMAC key
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    configured: bool,
}

impl TokenIssuer {
    pub fn new(secret: &Secret) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.expose().as_bytes()),
            configured: !secret.is_empty(),
        }
    }

    pub fn issue(&self, email: &str, expires_at: DateTime<Utc>) -> Result<String, TokenError> {
        if !self.configured {
            return Err(TokenError::EmptyKey);
        }

        let claims = Claims {
            email: email.to_string(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

/// Verifies signature and expiry of session tokens
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
    configured: bool,
}

impl TokenValidator {
    pub fn new(secret: &Secret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is still required; its comparison happens in validate_at
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            key: DecodingKey::from_secret(secret.expose().as_bytes()),
            validation,
            configured: !secret.is_empty(),
        }
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate as of `now`. Tokens are accepted strictly before their expiry.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        if !self.configured {
            return Err(TokenError::EmptyKey);
        }

        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
