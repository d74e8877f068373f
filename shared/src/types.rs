//! API request and response types
//!
//! All types serialize with camelCase field names, which is the wire
//! format the portal frontend consumes.

use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Generic success response carrying a human-readable message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub display_name: String,
    pub student_id: String,
    pub email: String,
    pub password: String,
}

/// Sign-in request
///
/// The identifier may be a username, an email address, or a student ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninRequest {
    pub identifier: String,
    pub password: String,
}

/// Sign-in response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub message: String,
    pub redirect_url: String,
}

/// Password reset request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// The subset of a user record safe to expose to the client.
///
/// This is also the identity snapshot stored in a session at sign-in
/// time. It never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserView {
    pub username: String,
    pub display_name: String,
    pub student_id: String,
    pub email: String,
    pub photo_ref: String,
}

/// Photo update response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUpdateResponse {
    pub photo_ref: String,
    pub photo_url: String,
    pub message: String,
}
