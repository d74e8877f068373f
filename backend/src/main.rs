//! Student Portal Backend
//!
//! Account-management service: registration, sign-in, session-backed
//! profile retrieval, profile-photo upload, and password reset.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Business logic
//! - Repositories: File-backed persistence (user records and sessions)

use anyhow::Result;
use std::time::Duration;
use student_portal_backend::{config, routes, services::AuthService, state::AppState, storage};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Student Portal Backend"
    );

    // Validate production configuration
    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    // Create application state and prepare on-disk layout
    let state = AppState::new(config);
    storage::bootstrap(&state).await?;

    // Seed the default administrator into an empty store
    AuthService::ensure_default_admin(&state).await?;

    // Sweep expired session files in the background
    spawn_session_reaper(state.clone());

    // Build application
    let app = routes::create_router(state.clone());

    // Start server
    let addr = format!(
        "{}:{}",
        state.config().server.host,
        state.config().server.port
    );
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "student_portal_backend=info,tower_http=info".into()
        } else {
            "student_portal_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    // The seed admin password must be rotated before going live
    if config.admin.password == config::AdminConfig::default().password {
        errors.push("Admin password must be changed from the default");
    }

    if config.auth.bcrypt_cost < 10 {
        errors.push("bcrypt cost below 10 is too weak for production");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Periodically sweep expired session files
///
/// The first sweep runs at startup, then every configured interval.
fn spawn_session_reaper(state: AppState) {
    let interval_secs = state.config().auth.session_reap_interval_secs;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            ticker.tick().await;
            match state.sessions().reap_expired().await {
                Ok(0) => {}
                Ok(reaped) => info!(reaped, "swept expired sessions"),
                Err(e) => warn!("session sweep failed: {}", e),
            }
        }
    });
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
