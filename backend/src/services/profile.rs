//! Profile and photo service
//!
//! Provides the authenticated profile read and the photo replacement
//! flow, which coordinates three resources: the uploaded asset on disk,
//! the user record, and the live session snapshot.

use anyhow::Context;
use chrono::Utc;
use tracing::{debug, warn};

use crate::auth::CurrentSession;
use crate::error::ApiError;
use crate::repositories::DEFAULT_PHOTO;
use crate::state::AppState;
use student_portal_shared::types::{PhotoUpdateResponse, PublicUserView};

/// Declared content types accepted for profile photos
const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Photo payload ceiling: 5 MiB
const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// An uploaded photo extracted from a multipart form
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Profile service for business logic
pub struct ProfileService;

impl ProfileService {
    /// The profile as the session saw it at sign-in
    ///
    /// Served from the session snapshot, not the record store; only the
    /// photo write-through patches the snapshot after sign-in.
    pub fn profile(session: &CurrentSession) -> PublicUserView {
        session.user.clone()
    }

    /// Replace the caller's profile photo
    ///
    /// Validation happens before anything is written, so a rejected
    /// upload leaves the record, the snapshot, and the asset directory
    /// untouched. On success the new filename is written through to the
    /// user record and the live session snapshot, and the previous
    /// asset is deleted best-effort unless it is the default sentinel.
    pub async fn update_photo(
        state: &AppState,
        session: &CurrentSession,
        upload: PhotoUpload,
    ) -> Result<PhotoUpdateResponse, ApiError> {
        if !ALLOWED_CONTENT_TYPES.contains(&upload.content_type.as_str()) {
            return Err(ApiError::InvalidFile(
                "Only JPEG, PNG and GIF images are allowed".to_string(),
            ));
        }
        if upload.data.len() > MAX_PHOTO_BYTES {
            return Err(ApiError::InvalidFile("File too large (max 5 MB)".to_string()));
        }

        let filename = Self::asset_name(&upload.filename);
        let path = state.config().storage.uploads_dir.join(&filename);
        tokio::fs::write(&path, &upload.data)
            .await
            .context("failed to write photo asset")?;

        let previous = session.user.photo_ref.clone();

        state
            .users()
            .update(&session.user.username, |u| u.photo_ref = filename.clone())
            .await?;

        // Write-through so the same session sees the new photo without
        // signing in again. A session that expired mid-request reports
        // false here and simply 401s on its next use.
        let touched = state
            .sessions()
            .touch(&session.token, |u| u.photo_ref = filename.clone())
            .await?;
        if !touched {
            debug!(username = %session.user.username, "session vanished during photo update");
        }

        Self::delete_previous_asset(state, &previous).await;

        Ok(PhotoUpdateResponse {
            photo_url: format!("/uploads/{}", filename),
            photo_ref: filename,
            message: "Photo updated successfully".to_string(),
        })
    }

    /// Build the stored asset name: upload millis plus the original
    /// filename with whitespace stripped
    ///
    /// Only the final path component of the client-supplied name is
    /// used, so the stored name can never leave the uploads directory.
    fn asset_name(original: &str) -> String {
        let base = original
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(original);
        let cleaned: String = base.chars().filter(|c| !c.is_whitespace()).collect();
        let cleaned = if cleaned.is_empty() {
            "photo".to_string()
        } else {
            cleaned
        };
        format!("{}-{}", Utc::now().timestamp_millis(), cleaned)
    }

    /// Best-effort delete of a replaced asset
    ///
    /// The default sentinel is shared by every fresh account and is
    /// never deleted. Refs carrying path separators are skipped; the
    /// store only ever holds single-component names.
    async fn delete_previous_asset(state: &AppState, previous: &str) {
        if previous == DEFAULT_PHOTO || previous.contains(['/', '\\']) {
            return;
        }
        let path = state.config().storage.uploads_dir.join(previous);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to delete replaced photo asset");
            }
        }
    }
}
