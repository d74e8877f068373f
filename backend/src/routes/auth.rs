//! Account routes
//!
//! Provides endpoints for registration, sign-in, sign-out, and
//! password reset. Sign-in hands the client an opaque session token in
//! an HttpOnly cookie; sign-out clears it and redirects to the landing
//! page.

use crate::auth::SESSION_COOKIE;
use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    Json,
};
use tower_cookies::{
    cookie::{time::Duration as CookieDuration, SameSite},
    Cookie, Cookies,
};

use student_portal_shared::types::{
    MessageResponse, ResetPasswordRequest, SigninRequest, SigninResponse, SignupRequest,
};

/// Build the session cookie for a freshly created token
///
/// HttpOnly and SameSite=Lax; lifetime matches the server-side TTL so
/// the browser drops the cookie around the time the session file dies.
fn session_cookie(token: String, ttl_secs: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(CookieDuration::seconds(ttl_secs));
    cookie
}

/// Register a new account
///
/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    AuthService::signup(&state, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Sign in with a username, email, or student ID
///
/// POST /signin
pub async fn signin(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<SigninResponse>> {
    let token = AuthService::signin(&state, req).await?;
    cookies.add(session_cookie(token, state.config().auth.session_ttl_secs));

    Ok(Json(SigninResponse {
        message: "Sign-in successful".to_string(),
        redirect_url: "/profile".to_string(),
    }))
}

/// Sign out and return to the landing page
///
/// GET /logout
///
/// Destroys the session server-side, clears the cookie, and redirects
/// with 303 regardless of whether a session existed.
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> ApiResult<Redirect> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        let token = cookie.value().to_string();
        AuthService::signout(&state, &token).await?;
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    cookies.remove(removal);

    Ok(Redirect::to("/"))
}

/// Overwrite the password for the account registered under an email
///
/// POST /reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::reset_password(&state, req).await?;
    Ok(Json(MessageResponse {
        message: "Password reset successful".to_string(),
    }))
}
