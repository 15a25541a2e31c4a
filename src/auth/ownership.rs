//! Resource ownership check
//!
//! One policy for every mutable resource: load it, read its owner, compare with
//! the caller recovered by the auth gate. Existence is checked first, so a
//! missing resource is "not found" rather than "unauthorized".

use super::{AuthError, UserId};
use crate::error::AppError;
use std::future::Future;

/// A resource with a single owning user, fixed at creation.
pub trait Owned {
    /// Human-readable resource kind, used in "not found" messages.
    const KIND: &'static str;

    fn owner_id(&self) -> UserId;
}

/// Pure owner comparison.
pub fn ensure_owner<R: Owned>(resource: &R, caller: UserId) -> Result<(), AuthError> {
    if resource.owner_id() == caller {
        Ok(())
    } else {
        tracing::warn!(
            kind = R::KIND,
            owner_id = resource.owner_id(),
            caller_id = caller,
            "Ownership check failed"
        );
        Err(AuthError::NotOwner)
    }
}

/// Load a resource through `loader` and admit `caller` only if they own it.
///
/// Returns the loaded resource so the handler can go on to mutate it.
pub async fn load_owned<R, F, Fut>(caller: UserId, loader: F) -> Result<R, AppError>
where
    R: Owned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<R>, AppError>>,
{
    let resource = loader().await?.ok_or_else(|| AppError::not_found(R::KIND))?;
    ensure_owner(&resource, caller)?;
    Ok(resource)
}
