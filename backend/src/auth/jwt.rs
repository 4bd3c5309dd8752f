//! JWT token generation and validation
//!
//! Access and refresh tokens share one HS256 secret; the encoding and
//! decoding keys are derived once at startup and cached behind Arcs.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Distinguishes the two token flavors inside claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token flavor
    pub token_type: TokenKind,
}

impl Claims {
    /// Parse the subject back into a user ID.
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| anyhow::anyhow!("Invalid user ID in token"))
    }
}

/// JWT service with pre-computed keys
///
/// Create once at startup and store in `AppState`; cloning only bumps
/// reference counts.
#[derive(Clone)]
pub struct JwtService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    access_expiry_secs: i64,
    refresh_expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expiry_secs: i64, refresh_expiry_secs: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            access_expiry_secs,
            refresh_expiry_secs,
        }
    }

    /// Generate an access token for a user
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String> {
        self.generate_token(user_id, TokenKind::Access, self.access_expiry_secs)
    }

    /// Generate a refresh token for a user
    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.generate_token(user_id, TokenKind::Refresh, self.refresh_expiry_secs)
    }

    fn generate_token(&self, user_id: Uuid, kind: TokenKind, expiry_secs: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
            iat: now.timestamp(),
            token_type: kind,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    /// Validate a token of the expected kind and return its claims.
    pub fn validate_token(&self, token: &str, expected: TokenKind) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        if data.claims.token_type != expected {
            anyhow::bail!("Wrong token type");
        }
        Ok(data.claims)
    }

    /// Access token lifetime in seconds (reported to clients).
    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret", 1800, 604800)
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.generate_access_token(user_id).unwrap();
        let claims = service.validate_token(&token, TokenKind::Access).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_generate_and_validate_refresh_token() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.generate_refresh_token(user_id).unwrap();
        let claims = service.validate_token(&token, TokenKind::Refresh).unwrap();

        assert_eq!(claims.token_type, TokenKind::Refresh);
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let service = create_test_service();
        let token = service.generate_access_token(Uuid::new_v4()).unwrap();

        assert!(service.validate_token(&token, TokenKind::Refresh).is_err());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(service.validate_token("invalid.token.here", TokenKind::Access).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = JwtService::new("other-secret", 1800, 604800);

        let token = service.generate_access_token(Uuid::new_v4()).unwrap();
        assert!(other.validate_token(&token, TokenKind::Access).is_err());
    }
}
