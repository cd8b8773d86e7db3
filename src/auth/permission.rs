//! Ownership checks for corkboard.
//!
//! Every mutation of a post or comment goes through the same guard, so the
//! rule lives in exactly one place.

use thiserror::Error;

use crate::BoardError;

/// Permission errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// Acting user does not own the resource.
    #[error("not the owner of this resource")]
    NotOwner,
}

impl From<PermissionError> for BoardError {
    fn from(e: PermissionError) -> Self {
        BoardError::Forbidden(e.to_string())
    }
}

/// Require that the acting user owns the resource.
///
/// # Examples
///
/// ```
/// use corkboard::require_owner;
///
/// assert!(require_owner("alice", "alice").is_ok());
/// assert!(require_owner("alice", "bob").is_err());
/// ```
pub fn require_owner(owner_id: &str, user_id: &str) -> Result<(), PermissionError> {
    if owner_id == user_id {
        Ok(())
    } else {
        Err(PermissionError::NotOwner)
    }
}
