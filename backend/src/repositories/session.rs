//! Session store
//!
//! Durable mapping of session token to authenticated identity, one JSON
//! file per session under the sessions directory. Sessions carry a
//! denormalized snapshot of the user's public fields taken at sign-in;
//! the snapshot does not track later record mutations except where a
//! caller explicitly patches it via `touch`.
//!
//! Expiry is a fixed TTL from creation, not sliding. Expired entries are
//! reaped lazily on `resolve` and periodically by `reap_expired`.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use student_portal_shared::types::PublicUserView;

/// A persisted session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: PublicUserView,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// File-per-session store
///
/// Tokens are freshly generated v4 UUIDs; the token doubles as the
/// session filename. Incoming tokens are parsed back into UUIDs before
/// any path is built, which confines filenames to the UUID alphabet and
/// makes unknown or malformed tokens resolve to "no session".
#[derive(Clone)]
pub struct SessionStore {
    dir: Arc<PathBuf>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(dir: PathBuf, ttl_secs: i64) -> Self {
        Self {
            dir: Arc::new(dir),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Create the sessions directory if it does not exist
    pub async fn init(&self) -> Result<()> {
        tokio::fs::create_dir_all(self.dir.as_ref())
            .await
            .context("failed to create sessions directory")?;
        Ok(())
    }

    fn session_path(&self, token: &str) -> Option<PathBuf> {
        let uuid = Uuid::parse_str(token).ok()?;
        Some(self.dir.join(format!("{}.json", uuid.hyphenated())))
    }

    /// Create a session for the given identity snapshot, returning the token
    pub async fn create(&self, user: PublicUserView) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let session = Session {
            token: token.clone(),
            user,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.persist(&session).await?;
        Ok(token)
    }

    async fn persist(&self, session: &Session) -> Result<()> {
        let path = self
            .session_path(&session.token)
            .context("session token is not a valid UUID")?;
        let bytes = serde_json::to_vec_pretty(session).context("failed to serialize session")?;
        tokio::fs::write(&path, &bytes)
            .await
            .context("failed to write session file")?;
        Ok(())
    }

    async fn read(&self, token: &str) -> Result<Option<Session>> {
        let Some(path) = self.session_path(token) else {
            return Ok(None);
        };
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(anyhow::Error::new(e).context("failed to read session file")),
        };
        let session: Session =
            serde_json::from_slice(&bytes).context("session file is not valid JSON")?;
        Ok(Some(session))
    }

    /// Resolve a token to its identity snapshot
    ///
    /// Returns `None` for unknown, malformed, or expired tokens. An
    /// expired session file is deleted on the spot.
    pub async fn resolve(&self, token: &str) -> Result<Option<PublicUserView>> {
        match self.read(token).await? {
            Some(session) if session.is_expired() => {
                debug!(token, "reaping expired session on resolve");
                self.destroy(token).await?;
                Ok(None)
            }
            Some(session) => Ok(Some(session.user)),
            None => Ok(None),
        }
    }

    /// Patch the identity snapshot of a live session in place
    ///
    /// Creation and expiry stamps are preserved. Returns `false` if no
    /// live session exists for the token.
    pub async fn touch<F>(&self, token: &str, mutator: F) -> Result<bool>
    where
        F: FnOnce(&mut PublicUserView),
    {
        let Some(mut session) = self.read(token).await? else {
            return Ok(false);
        };
        if session.is_expired() {
            self.destroy(token).await?;
            return Ok(false);
        }
        mutator(&mut session.user);
        self.persist(&session).await?;
        Ok(true)
    }

    /// Destroy a session unconditionally; idempotent for unknown tokens
    pub async fn destroy(&self, token: &str) -> Result<()> {
        let Some(path) = self.session_path(token) else {
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e).context("failed to remove session file")),
        }
    }

    /// Sweep the sessions directory, deleting every expired entry
    ///
    /// Returns the number of sessions removed. Unreadable entries are
    /// skipped with a warning rather than failing the sweep.
    pub async fn reap_expired(&self) -> Result<usize> {
        let mut reaped = 0;
        let mut entries = tokio::fs::read_dir(self.dir.as_ref())
            .await
            .context("failed to read sessions directory")?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable session file");
                    continue;
                }
            };
            let session: Session = match serde_json::from_slice(&bytes) {
                Ok(session) => session,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping malformed session file");
                    continue;
                }
            };
            if session.is_expired() {
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    warn!(path = %path.display(), error = %e, "failed to reap session file");
                } else {
                    reaped += 1;
                }
            }
        }
        Ok(reaped)
    }
}
