//! User record store
//!
//! Durable mapping of identity to user record, persisted as a single
//! JSON array file. Every mutation loads the full collection, applies
//! the change, and rewrites the file as a unit; a store-wide async mutex
//! serializes the read-modify-write cycle so concurrent writers cannot
//! lose each other's updates. Reads go lock-free: the rewrite lands via
//! an atomic rename, so a reader always sees a complete file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use student_portal_shared::types::PublicUserView;

/// Photo reference assigned to accounts that have not uploaded a photo
pub const DEFAULT_PHOTO: &str = "default-avatar.png";

/// A stored user record
///
/// `username`, `email` and `student_id` are each unique across the
/// store; `username` is immutable after creation. Field names persist in
/// camelCase, the same shape the API exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub display_name: String,
    pub student_id: String,
    pub email: String,
    pub password_hash: String,
    pub photo_ref: String,
}

impl UserRecord {
    /// The subset of the record safe to expose to clients
    pub fn public_view(&self) -> PublicUserView {
        PublicUserView {
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            student_id: self.student_id.clone(),
            email: self.email.clone(),
            photo_ref: self.photo_ref.clone(),
        }
    }

    /// Whether the given sign-in identifier names this record
    ///
    /// Identifiers resolve against username, email, or student ID.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.username == identifier || self.email == identifier || self.student_id == identifier
    }
}

/// User store errors
#[derive(Error, Debug)]
pub enum UserStoreError {
    #[error("username or email already exists")]
    DuplicateIdentifier,

    #[error("student id already registered")]
    DuplicateStudentId,

    #[error("user not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// File-backed user record store
///
/// Cloning is cheap; clones share the same write lock.
#[derive(Clone)]
pub struct UserStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl UserStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Arc::new(path),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create the backing file (empty collection) if it does not exist
    pub async fn init(&self) -> Result<()> {
        if tokio::fs::try_exists(self.path.as_ref()).await? {
            return Ok(());
        }
        self.persist(&[]).await
    }

    /// Load the full collection
    async fn load(&self) -> Result<Vec<UserRecord>> {
        let bytes = match tokio::fs::read(self.path.as_ref()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(anyhow::Error::new(e).context("failed to read user record file"))
            }
        };
        serde_json::from_slice(&bytes).context("user record file is not valid JSON")
    }

    /// Rewrite the full collection
    ///
    /// Writes to a sibling temp file and renames over the original, so a
    /// crash mid-write can never truncate the store.
    async fn persist(&self, users: &[UserRecord]) -> Result<()> {
        let bytes =
            serde_json::to_vec_pretty(users).context("failed to serialize user records")?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .context("failed to write user record file")?;
        tokio::fs::rename(&tmp, self.path.as_ref())
            .await
            .context("failed to replace user record file")?;
        Ok(())
    }

    /// Find a record by sign-in identifier (username, email, or student ID)
    ///
    /// First match wins; identifiers are unique in practice so at most
    /// one record matches.
    pub async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let users = self.load().await?;
        Ok(users.into_iter().find(|u| u.matches_identifier(identifier)))
    }

    /// Find a record by exact username
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let users = self.load().await?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    /// Find a record by exact email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserStoreError> {
        let users = self.load().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// Insert a new record
    ///
    /// Uniqueness is enforced as two separate checks inside one locked
    /// critical section: username/email first, then student ID.
    pub async fn insert(&self, record: UserRecord) -> Result<(), UserStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.load().await?;

        if users
            .iter()
            .any(|u| u.username == record.username || u.email == record.email)
        {
            return Err(UserStoreError::DuplicateIdentifier);
        }
        if users.iter().any(|u| u.student_id == record.student_id) {
            return Err(UserStoreError::DuplicateStudentId);
        }

        users.push(record);
        self.persist(&users).await?;
        Ok(())
    }

    /// Apply a mutation to the record with the given username
    ///
    /// Returns the record as it was persisted.
    pub async fn update<F>(&self, username: &str, mutator: F) -> Result<UserRecord, UserStoreError>
    where
        F: FnOnce(&mut UserRecord),
    {
        let _guard = self.write_lock.lock().await;
        let mut users = self.load().await?;

        let record = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or(UserStoreError::NotFound)?;

        mutator(record);
        let updated = record.clone();
        self.persist(&users).await?;
        Ok(updated)
    }

    /// Number of stored records
    pub async fn count(&self) -> Result<usize, UserStoreError> {
        Ok(self.load().await?.len())
    }
}
