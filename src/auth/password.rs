//! Password hashing and verification using Argon2id

use super::AuthError;
use crate::config::SecurityConfig;
use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PhcError, PasswordHash, PasswordHasher as _,
        PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Password hasher with configurable parameters
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Verified against when the login email is unknown, so both paths pay for
    /// one verification at the same cost.
    dummy_hash: OnceCell<Option<String>>,
}

impl PasswordHasher {
    /// Create hasher with explicit Argon2id cost parameters
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::Hashing(format!("invalid Argon2 params: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            dummy_hash: OnceCell::new(),
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, AuthError> {
        Self::with_params(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
        )
    }

    /// Hash a password. The salt is random per call and embedded in the PHC output.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AuthError::Hashing(e.to_string())
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a stored hash.
    ///
    /// The salt and cost parameters come from `hash`, not from `self`, so hashes
    /// produced under older parameters keep verifying.
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), AuthError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            tracing::error!("Failed to parse stored password hash: {:?}", e);
            AuthError::Hashing(format!("stored hash is not a valid PHC string: {}", e))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(()),
            Err(PhcError::Password) => Err(AuthError::PasswordMismatch),
            Err(e) => {
                tracing::error!("Password verification failed to run: {:?}", e);
                Err(AuthError::Hashing(e.to_string()))
            }
        }
    }

    /// Burn one verification for a login whose account does not exist.
    pub fn verify_dummy(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_init(|| self.hash("mygram-dummy-password").ok());
        if let Some(hash) = dummy.as_deref() {
            let _ = self.verify(password, hash);
        }
    }

    /// `hash` on the blocking pool
    pub async fn hash_blocking(self: &Arc<Self>, password: String) -> Result<String, AuthError> {
        let hasher = Arc::clone(self);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Hashing(format!("hashing task failed: {}", e)))?
    }

    /// `verify` on the blocking pool; `None` runs the dummy verification and
    /// reports a mismatch.
    pub async fn verify_blocking(
        self: &Arc<Self>,
        password: String,
        hash: Option<String>,
    ) -> Result<(), AuthError> {
        let hasher = Arc::clone(self);
        tokio::task::spawn_blocking(move || match hash {
            Some(hash) => hasher.verify(&password, &hash),
            None => {
                hasher.verify_dummy(&password);
                Err(AuthError::PasswordMismatch)
            }
        })
        .await
        .map_err(|e| AuthError::Hashing(format!("verification task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(4096, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash("password123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        hasher.verify("password123", &hash).unwrap();
    }

    #[test]
    fn test_verify_fails_with_wrong_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash("password123").unwrap();

        assert_eq!(
            hasher.verify("password124", &hash),
            Err(AuthError::PasswordMismatch)
        );
    }

    #[test]
    fn test_hash_is_different_each_time() {
        let hasher = fast_hasher();
        let hash1 = hasher.hash("password123").unwrap();
        let hash2 = hasher.hash("password123").unwrap();

        assert_ne!(hash1, hash2);
        hasher.verify("password123", &hash1).unwrap();
        hasher.verify("password123", &hash2).unwrap();
    }

    #[test]
    fn test_corrupt_hash_is_a_hashing_error() {
        let hasher = fast_hasher();
        assert!(matches!(
            hasher.verify("password123", "not-a-phc-string"),
            Err(AuthError::Hashing(_))
        ));
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(PasswordHasher::with_params(0, 0, 0).is_err());
    }

    #[test]
    fn test_verify_uses_parameters_embedded_in_hash() {
        let old = PasswordHasher::with_params(8192, 2, 1).unwrap();
        let hash = old.hash("password123").unwrap();

        fast_hasher().verify("password123", &hash).unwrap();
    }

    #[tokio::test]
    async fn test_blocking_wrappers() {
        let hasher = Arc::new(fast_hasher());
        let hash = hasher.hash_blocking("password123".to_string()).await.unwrap();

        hasher
            .verify_blocking("password123".to_string(), Some(hash.clone()))
            .await
            .unwrap();
        assert_eq!(
            hasher
                .verify_blocking("password124".to_string(), Some(hash))
                .await,
            Err(AuthError::PasswordMismatch)
        );
    }

    #[tokio::test]
    async fn test_unknown_account_reports_mismatch() {
        let hasher = Arc::new(fast_hasher());
        assert_eq!(
            hasher.verify_blocking("password123".to_string(), None).await,
            Err(AuthError::PasswordMismatch)
        );
    }
}
