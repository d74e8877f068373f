//! Storage bootstrap and health checks
//!
//! This module prepares the on-disk layout the service needs at startup
//! (data directory, sessions directory, uploads directory, user record
//! file) and provides the health probe the readiness endpoint uses.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::state::AppState;

/// Create every directory and backing file the stores rely on
///
/// Idempotent; safe to call on every startup.
pub async fn bootstrap(state: &AppState) -> Result<()> {
    let config = state.config();

    tokio::fs::create_dir_all(&config.storage.data_dir)
        .await
        .context("failed to create data directory")?;
    tokio::fs::create_dir_all(&config.storage.uploads_dir)
        .await
        .context("failed to create uploads directory")?;

    state.sessions().init().await?;
    state.users().init().await?;

    info!(
        data_dir = %config.storage.data_dir.display(),
        uploads_dir = %config.storage.uploads_dir.display(),
        "storage bootstrapped"
    );
    Ok(())
}

/// Check storage health
///
/// Verifies the user record file is present and parseable by running a
/// full load through the store.
pub async fn health_check(state: &AppState) -> Result<()> {
    state
        .users()
        .count()
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Storage health check failed: {}", e);
            anyhow::Error::from(e)
        })
}
