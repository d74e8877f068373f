//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: stores are created once
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling

use crate::auth::PasswordService;
use crate::config::AppConfig;
use crate::repositories::{SessionStore, UserStore};
use std::sync::Arc;

/// Shared application state
///
/// This struct holds all shared resources that handlers need access to.
/// All fields are designed for cheap cloning across async tasks.
///
/// # Performance
///
/// - `config`: Wrapped in Arc, cloning is O(1)
/// - `users` / `sessions`: internally Arc'd, cloning is O(1)
/// - `password`: Copy, carries only the work factor
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// User record store
    pub users: UserStore,
    /// Session store
    pub sessions: SessionStore,
    /// Password hashing service with the configured work factor
    pub password: PasswordService,
}

impl AppState {
    /// Create a new application state from configuration
    ///
    /// Store handles point at the paths the configuration names; the
    /// backing files are created by `storage::bootstrap`, not here.
    pub fn new(config: AppConfig) -> Self {
        let users = UserStore::new(config.users_file());
        let sessions = SessionStore::new(config.sessions_dir(), config.auth.session_ttl_secs);
        let password = PasswordService::new(config.auth.bcrypt_cost);

        Self {
            config: Arc::new(config),
            users,
            sessions,
            password,
        }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the user store
    #[inline]
    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Get a reference to the session store
    #[inline]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Get a reference to the password service
    #[inline]
    pub fn password(&self) -> &PasswordService {
        &self.password
    }
}
