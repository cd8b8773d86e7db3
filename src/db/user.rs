//! User model for corkboard.

use serde::Serialize;

/// User entity representing a registered account.
///
/// The `id` is the login identifier chosen at signup and acts as the
/// primary key; posts and comments reference it as their owner.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Login id (unique, chosen at signup).
    pub id: String,
    /// Display name.
    pub username: String,
    /// Password hash (Argon2).
    #[serde(skip_serializing)]
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login id.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Password hash (never the plain password).
    pub password: String,
}

impl NewUser {
    /// Create a new user record from a login id, display name, and password hash.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            password: password_hash.into(),
        }
    }
}
