//! Ownership predicate used before every read or mutation of user data.
//!
//! Ownership failures surface as [`CoreError::NotFound`], never
//! `Forbidden`, so callers cannot discover ids belonging to other users.

use crate::error::CoreError;
use crate::types::DbId;

/// A resource that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> DbId;

    fn belongs_to(&self, user_id: DbId) -> bool {
        self.owner_id() == user_id
    }
}

/// Resolve a lookup result into an owned resource or a not-found error.
///
/// A missing row and a row owned by someone else are indistinguishable to
/// the caller.
pub fn ensure_owned<T: Owned>(
    resource: Option<T>,
    user_id: DbId,
    entity: &'static str,
    id: DbId,
) -> Result<T, CoreError> {
    match resource {
        Some(r) if r.belongs_to(user_id) => Ok(r),
        _ => Err(CoreError::NotFound { entity, id }),
    }
}
