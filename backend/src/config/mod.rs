//! Configuration management for the Student Portal backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: PORTAL__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Persistent storage configuration
///
/// `data_dir` holds the user record file and the per-session files;
/// `uploads_dir` holds the profile photo assets. Both are created at
/// startup if absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
    /// Session lifetime measured from creation, not sliding
    pub session_ttl_secs: i64,
    /// Interval between background sweeps of expired session files
    pub session_reap_interval_secs: u64,
}

/// Default administrator account seeded on first run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub display_name: String,
    pub student_id: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            display_name: "Administrator".to_string(),
            student_id: "000".to_string(),
            email: "admin@portal.local".to_string(),
            password: "change-me-on-first-login".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("data"),
                uploads_dir: PathBuf::from("uploads"),
            },
            auth: AuthConfig {
                bcrypt_cost: 12,
                session_ttl_secs: 86_400,          // 24 hours
                session_reap_interval_secs: 3_600, // 1 hour
            },
            admin: AdminConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with PORTAL__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (PORTAL__ prefix)
            // e.g., PORTAL__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("PORTAL").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Path of the user record file inside the data directory
    pub fn users_file(&self) -> PathBuf {
        self.storage.data_dir.join("users.json")
    }

    /// Path of the per-session file directory inside the data directory
    pub fn sessions_dir(&self) -> PathBuf {
        self.storage.data_dir.join("sessions")
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
