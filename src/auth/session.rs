//! Session management for corkboard.
//!
//! A session is an opaque random token mapped to a user id and an expiry
//! timestamp. The store behind the mapping is injected as a trait object so
//! the web layer works the same against the in-memory map used in tests and
//! the SQLite-backed store used in production.
//!
//! Expired sessions are cleaned up lazily: a `resolve` that finds an expired
//! entry removes it as a side effect. There is no background sweep, and no
//! cross-process discipline - concurrent writers may lose updates.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Default session time-to-live (30 minutes).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Session-related errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Token is not in the store.
    #[error("session not found")]
    NotFound,

    /// Token was in the store but its expiry has passed.
    #[error("session expired")]
    Expired,

    /// The backing store failed.
    #[error("session store error: {0}")]
    Store(String),
}

/// A logged-in session.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// Opaque random token (UUID v4).
    pub token: String,
    /// User id this session belongs to.
    pub user_id: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for a user with the given time-to-live.
    pub fn new(user_id: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or_default();

        Self {
            token: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at,
        }
    }

    /// Check if the session has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Get the remaining time until expiration.
    pub fn remaining_time(&self) -> Option<chrono::Duration> {
        let remaining = self.expires_at - Utc::now();
        if remaining.num_milliseconds() > 0 {
            Some(remaining)
        } else {
            None
        }
    }
}

/// Store mapping session tokens to logged-in users.
///
/// All implementations share the same contract:
/// - `create` inserts a fresh token expiring `ttl` from now
/// - `resolve` fails on unknown or expired tokens, removing expired entries
/// - `destroy` is idempotent
/// - `extend` resets the expiry if the token is present, and is a no-op
///   otherwise
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session for a user and return it.
    async fn create(&self, user_id: &str, ttl: Duration) -> Result<Session, SessionError>;

    /// Resolve a token to its session.
    async fn resolve(&self, token: &str) -> Result<Session, SessionError>;

    /// Remove a session. Removing an absent token is not an error.
    async fn destroy(&self, token: &str) -> Result<(), SessionError>;

    /// Push a session's expiry to `now + ttl` if the token is present.
    async fn extend(&self, token: &str, ttl: Duration) -> Result<(), SessionError>;
}

/// In-memory session store.
///
/// Used in tests and available for single-process deployments that do not
/// need sessions to survive a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held, including not-yet-collected
    /// expired ones.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Session>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|_| SessionError::Store("session store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: &str, ttl: Duration) -> Result<Session, SessionError> {
        let session = Session::new(user_id, ttl);
        let mut sessions = self.lock()?;
        sessions.insert(session.token.clone(), session.clone());

        info!(user_id = %user_id, token = %session.token, "Session created");
        Ok(session)
    }

    async fn resolve(&self, token: &str) -> Result<Session, SessionError> {
        let mut sessions = self.lock()?;

        let session = sessions.get(token).ok_or(SessionError::NotFound)?;
        if session.is_expired() {
            sessions.remove(token);
            debug!(token = %token, "Removed expired session on resolve");
            return Err(SessionError::Expired);
        }

        Ok(session.clone())
    }

    async fn destroy(&self, token: &str) -> Result<(), SessionError> {
        let mut sessions = self.lock()?;
        if sessions.remove(token).is_some() {
            info!(token = %token, "Session destroyed");
        }
        Ok(())
    }

    async fn extend(&self, token: &str, ttl: Duration) -> Result<(), SessionError> {
        let mut sessions = self.lock()?;
        if let Some(session) = sessions.get_mut(token) {
            session.expires_at = Utc::now() + chrono::Duration::from_std(ttl).unwrap_or_default();
        }
        Ok(())
    }
}

/// SQLite-backed session store, one row per active session.
///
/// Survives restarts; rows for deleted users disappear via the schema's
/// cascade rules.
#[derive(Debug, Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Create a store over the given pool. The `sessions` table must exist.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of session rows, including not-yet-collected expired ones.
    pub async fn session_count(&self) -> Result<i64, SessionError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;
        Ok(count.0)
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(&self, user_id: &str, ttl: Duration) -> Result<Session, SessionError> {
        let session = Session::new(user_id, ttl);

        sqlx::query(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.token)
        .bind(&session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::Store(e.to_string()))?;

        info!(user_id = %user_id, token = %session.token, "Session created");
        Ok(session)
    }

    async fn resolve(&self, token: &str) -> Result<Session, SessionError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT token, user_id, created_at, expires_at FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SessionError::Store(e.to_string()))?
        .ok_or(SessionError::NotFound)?;

        if session.is_expired() {
            sqlx::query("DELETE FROM sessions WHERE token = ?")
                .bind(token)
                .execute(&self.pool)
                .await
                .map_err(|e| SessionError::Store(e.to_string()))?;
            debug!(token = %token, "Removed expired session on resolve");
            return Err(SessionError::Expired);
        }

        Ok(session)
    }

    async fn destroy(&self, token: &str) -> Result<(), SessionError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;

        if result.rows_affected() > 0 {
            info!(token = %token, "Session destroyed");
        }
        Ok(())
    }

    async fn extend(&self, token: &str, ttl: Duration) -> Result<(), SessionError> {
        let expires_at = Utc::now() + chrono::Duration::from_std(ttl).unwrap_or_default();
        sqlx::query("UPDATE sessions SET expires_at = ? WHERE token = ?")
            .bind(expires_at)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;
        Ok(())
    }
}
