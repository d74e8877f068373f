//! Profile routes
//!
//! Provides the authenticated profile read and the multipart photo
//! upload. Both require a live session via the `CurrentSession`
//! extractor.

use crate::auth::CurrentSession;
use crate::error::{ApiError, ApiResult};
use crate::services::{PhotoUpload, ProfileService};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};

use student_portal_shared::types::{PhotoUpdateResponse, PublicUserView};

/// The caller's profile snapshot
///
/// GET /profile-data
pub async fn profile_data(session: CurrentSession) -> Json<PublicUserView> {
    Json(ProfileService::profile(&session))
}

/// Replace the caller's profile photo
///
/// POST /update-photo, multipart form with a `photo` file field
pub async fn update_photo(
    State(state): State<AppState>,
    session: CurrentSession,
    mut multipart: Multipart,
) -> ApiResult<Json<PhotoUpdateResponse>> {
    let mut upload: Option<PhotoUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidFile(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some("photo") {
            continue;
        }
        let filename = field.file_name().unwrap_or("photo").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidFile(format!("Malformed upload: {}", e)))?
            .to_vec();
        upload = Some(PhotoUpload {
            filename,
            content_type,
            data,
        });
        break;
    }

    let upload = upload.ok_or_else(|| ApiError::InvalidFile("No file uploaded".to_string()))?;
    let response = ProfileService::update_photo(&state, &session, upload).await?;
    Ok(Json(response))
}
