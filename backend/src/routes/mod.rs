//! Route definitions for the Student Portal API
//!
//! This module organizes all API routes and applies middleware. The
//! HTTP surface is flat: account routes, profile routes, health
//! probes, and static serving of uploaded photo assets.

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod profile;


/// Request body ceiling: the 5 MiB photo limit plus multipart framing
const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let uploads_dir = state.config().storage.uploads_dir.clone();

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/logout", get(auth::logout))
        .route("/reset-password", post(auth::reset_password))
        .route("/profile-data", get(profile::profile_data))
        .route("/update-photo", post(profile::update_photo))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        // Apply middleware layers
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CookieManagerLayer::new())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
