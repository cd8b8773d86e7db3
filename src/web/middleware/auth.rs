//! Cookie-session authentication middleware.
//!
//! A `from_fn` middleware injects the session store into request extensions;
//! the `CurrentUser` extractor reads the session cookie and resolves it
//! against that store. Handlers that take `CurrentUser` are authenticated,
//! everything else stays public.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{SessionError, SessionStore};
use crate::web::error::ApiError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session_id";

/// Session state shared with the `CurrentUser` extractor.
pub struct SessionLayer {
    /// The injected session store.
    pub store: Arc<dyn SessionStore>,
    /// Time-to-live applied when sliding a session forward.
    pub ttl: Duration,
}

impl SessionLayer {
    /// Create a new session layer state.
    pub fn new(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }
}

/// Middleware function to inject the session layer into request extensions.
pub async fn session_auth(
    layer: Arc<SessionLayer>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(layer);
    next.run(request).await
}

/// Extractor for the acting user.
///
/// Resolves the session cookie to a user id, failing with 401 when the
/// cookie is missing, unknown, or expired. A successful resolve slides the
/// session's expiry forward.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The acting user's login id.
    pub user_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| ApiError::unauthorized("Not logged in"))?;

        let layer = parts
            .extensions
            .get::<Arc<SessionLayer>>()
            .ok_or_else(|| ApiError::internal("Session store not configured"))?;

        let session = layer.store.resolve(&token).await.map_err(|e| match e {
            SessionError::NotFound => ApiError::unauthorized("Invalid session"),
            SessionError::Expired => ApiError::unauthorized("Session expired"),
            SessionError::Store(msg) => {
                tracing::error!("Session lookup failed: {}", msg);
                ApiError::internal("Session lookup failed")
            }
        })?;

        // Sliding expiry; a failed extension doesn't fail the request
        if let Err(e) = layer.store.extend(&token, layer.ttl).await {
            tracing::warn!("Failed to extend session: {}", e);
        }

        Ok(CurrentUser {
            user_id: session.user_id,
        })
    }
}
