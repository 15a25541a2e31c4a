//! Authentication and ownership authorization
//!
//! Three pieces, composed bottom-up: the password hasher, the token service,
//! and the access gate (request interception plus the per-resource owner check).

pub mod jwt;
pub mod middleware;
pub mod ownership;
pub mod password;

use thiserror::Error;

pub use jwt::{Claims, TokenService};
pub use middleware::{extract_token, require_auth, AuthContext};
pub use ownership::{ensure_owner, load_owned, Owned};
pub use password::PasswordHasher;

/// Numeric user identifier, the subject of every issued token.
pub type UserId = i64;

/// Outcomes of the authentication layer.
///
/// Every kind stays distinct up to the HTTP boundary, where
/// `From<AuthError> for AppError` collapses the token and owner failures into
/// a single 401.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Hashing or verification could not run (bad parameters, corrupt stored hash,
    /// blocking task lost).
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("password does not match")]
    PasswordMismatch,

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("no bearer token presented")]
    MissingToken,

    /// Corrupt encoding, bad signature, missing claims or a non-numeric subject.
    #[error("token is malformed or not signed by this server")]
    TokenMalformed,

    #[error("token has expired")]
    TokenExpired,

    #[error("caller does not own the resource")]
    NotOwner,
}
