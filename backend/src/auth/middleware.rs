//! Session extraction middleware
//!
//! Provides the Axum extractor that turns the session cookie into an
//! authenticated identity. Handlers that take `CurrentSession` as an
//! argument are gated behind a live session automatically.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tower_cookies::Cookies;

use student_portal_shared::types::PublicUserView;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "portal_session";

/// Authenticated session extracted from the request cookie
///
/// Resolution goes through the session store, so an expired session is
/// reaped on the way and rejected the same as a missing one. Rejections
/// are uniformly `Not authenticated`; the response does not distinguish
/// missing, malformed, and expired tokens.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: String,
    pub user: PublicUserView,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // CookieManagerLayer populates this; a missing layer surfaces as
        // a 401 rather than a 500 so the contract stays uniform.
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Unauthenticated)?;

        let token = cookies
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(ApiError::Unauthenticated)?;

        let user = app_state
            .sessions()
            .resolve(&token)
            .await?
            .ok_or(ApiError::Unauthenticated)?;

        Ok(CurrentSession { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_session_debug_omits_nothing_sensitive() {
        let session = CurrentSession {
            token: "token".to_string(),
            user: PublicUserView {
                username: "alice".to_string(),
                display_name: "Alice A".to_string(),
                student_id: "123".to_string(),
                email: "a@x.com".to_string(),
                photo_ref: "default-avatar.png".to_string(),
            },
        };
        let debug_str = format!("{:?}", session);
        assert!(debug_str.contains("CurrentSession"));
        // The snapshot never carries a password hash
        assert!(!debug_str.to_lowercase().contains("password"));
    }
}
