//! JWT token generation and validation
//!
//! Tokens are stateless: validity is the HS256 signature plus `now < exp`.
//! Nothing is stored server-side, so a token cannot be revoked before it
//! expires short of rotating the signing secret.

use super::{AuthError, UserId};
use crate::config::SecurityConfig;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID, decimal)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration (exclusive)
    pub exp: i64,
}

impl Claims {
    /// Subject parsed back into a user id
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub.parse::<UserId>().map_err(|_| {
            tracing::debug!(sub = %self.sub, "Token subject is not a user id");
            AuthError::TokenMalformed
        })
    }
}

/// Issues and validates identity tokens.
///
/// Holds only immutable key material and the TTL, so one instance is shared
/// behind an `Arc` by every request.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Result<Self, AuthError> {
        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AuthError::Signing(
                "JWT secret too short (min 32 chars)".to_string(),
            ));
        }
        let ttl_secs = i64::try_from(ttl_secs)
            .map_err(|_| AuthError::Signing("token TTL out of range".to_string()))?;

        // Expiry is checked against our own clock below: the library check is
        // inclusive and applies leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(ttl_secs),
        })
    }

    /// Create token service from config
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AuthError> {
        Self::new(
            config.jwt_secret.expose_secret().as_bytes(),
            config.token_ttl_secs,
        )
    }

    /// Seconds a fresh token stays valid
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn create_token(&self, user_id: UserId) -> Result<String, AuthError> {
        self.create_token_at(user_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn create_token_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AuthError::Signing(e.to_string())
        })
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Decode and verify `token`, treating `now` as the current time.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AuthError::TokenMalformed
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            tracing::debug!(sub = %claims.sub, exp = claims.exp, "Token expired");
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// The only way the rest of the service learns who is calling.
    pub fn extract_identity(&self, token: &str) -> Result<UserId, AuthError> {
        self.extract_identity_at(token, Utc::now())
    }

    pub fn extract_identity_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, AuthError> {
        self.validate_at(token, now)?.user_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &[u8] = b"test_secret_key_32_characters_long!";

    fn service() -> TokenService {
        TokenService::new(SECRET, 3600).unwrap()
    }

    #[test]
    fn test_create_and_extract_identity() {
        let service = service();
        let token = service.create_token(42).unwrap();

        assert_eq!(service.extract_identity(&token).unwrap(), 42);
    }

    #[test]
    fn test_claims_carry_issue_and_expiry() {
        let service = service();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let token = service.create_token_at(7, now).unwrap();

        let claims = service.validate_at(&token, now).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expiry_is_exclusive() {
        let service = service();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let token = service.create_token_at(7, now).unwrap();

        let just_before = now + Duration::seconds(3599);
        let at_expiry = now + Duration::seconds(3600);
        assert!(service.validate_at(&token, just_before).is_ok());
        assert_eq!(
            service.validate_at(&token, at_expiry),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn test_other_secret_is_malformed() {
        let token = service().create_token(42).unwrap();
        let other = TokenService::new(b"another_secret_key_32_characters!!", 3600).unwrap();

        assert_eq!(other.validate(&token), Err(AuthError::TokenMalformed));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let service = service();
        assert_eq!(service.validate("invalid_token"), Err(AuthError::TokenMalformed));
        assert_eq!(service.validate(""), Err(AuthError::TokenMalformed));
    }

    #[test]
    fn test_non_numeric_subject_is_malformed() {
        let service = service();
        let claims = Claims {
            sub: "alice".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(service.validate(&token).is_ok());
        assert_eq!(service.extract_identity(&token), Err(AuthError::TokenMalformed));
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(TokenService::new(b"short", 3600).is_err());
    }
}
