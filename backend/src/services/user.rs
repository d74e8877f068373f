//! Account service
//!
//! Provides business logic for the account lifecycle:
//! - Registration with field validation and uniqueness enforcement
//! - Sign-in producing a session snapshot
//! - Sign-out and password reset
//! - Default administrator seeding on first run

use tracing::info;

use crate::error::ApiError;
use crate::repositories::{UserRecord, UserStoreError, DEFAULT_PHOTO};
use crate::state::AppState;
use student_portal_shared::types::{ResetPasswordRequest, SigninRequest, SignupRequest};
use student_portal_shared::validation::{
    validate_display_name, validate_email, validate_password, validate_student_id,
    validate_username,
};

/// Account service for business logic
pub struct AuthService;

impl AuthService {
    /// Register a new account
    ///
    /// Uniqueness is enforced by the store in two steps, username/email
    /// before student ID, so a record colliding on both reports the
    /// username/email conflict.
    pub async fn signup(state: &AppState, req: SignupRequest) -> Result<(), ApiError> {
        validate_username(&req.username).map_err(ApiError::Validation)?;
        validate_display_name(&req.display_name).map_err(ApiError::Validation)?;
        validate_student_id(&req.student_id).map_err(ApiError::Validation)?;
        validate_email(&req.email).map_err(ApiError::Validation)?;
        validate_password(&req.password).map_err(ApiError::Validation)?;

        let password_hash = state.password().hash_async(req.password).await?;

        let record = UserRecord {
            username: req.username,
            display_name: req.display_name,
            student_id: req.student_id,
            email: req.email,
            password_hash,
            photo_ref: DEFAULT_PHOTO.to_string(),
        };
        state.users().insert(record).await?;
        Ok(())
    }

    /// Verify credentials and open a session, returning the token
    ///
    /// The identifier may be a username, an email address, or a student
    /// ID. Unknown identifiers and wrong passwords both map to
    /// `InvalidCredentials`, so the response never reveals which part
    /// was wrong.
    pub async fn signin(state: &AppState, req: SigninRequest) -> Result<String, ApiError> {
        if req.identifier.trim().is_empty() || req.password.is_empty() {
            return Err(ApiError::Validation("All fields are required".to_string()));
        }

        let user = state
            .users()
            .find_by_identifier(&req.identifier)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let verified = state
            .password()
            .verify_async(req.password, user.password_hash.clone())
            .await?;
        if !verified {
            return Err(ApiError::InvalidCredentials);
        }

        let token = state.sessions().create(user.public_view()).await?;
        Ok(token)
    }

    /// Close a session; a no-op for unknown or malformed tokens
    pub async fn signout(state: &AppState, token: &str) -> Result<(), ApiError> {
        state.sessions().destroy(token).await?;
        Ok(())
    }

    /// Overwrite the password of the account registered under `email`
    ///
    /// Existing sessions stay valid and no proof of account ownership
    /// is required beyond knowing the email address.
    pub async fn reset_password(
        state: &AppState,
        req: ResetPasswordRequest,
    ) -> Result<(), ApiError> {
        if req.email.trim().is_empty() || req.new_password.is_empty() {
            return Err(ApiError::Validation("All fields are required".to_string()));
        }
        validate_password(&req.new_password).map_err(ApiError::Validation)?;

        let user = state
            .users()
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let password_hash = state.password().hash_async(req.new_password).await?;
        state
            .users()
            .update(&user.username, |u| u.password_hash = password_hash)
            .await?;
        Ok(())
    }

    /// Seed the configured administrator account into an empty store
    ///
    /// Idempotent; runs once at startup. A store that already holds any
    /// record is left untouched.
    pub async fn ensure_default_admin(state: &AppState) -> anyhow::Result<()> {
        if state.users().count().await? > 0 {
            return Ok(());
        }

        let admin = state.config().admin.clone();
        let password_hash = state.password().hash_async(admin.password).await?;
        let record = UserRecord {
            username: admin.username,
            display_name: admin.display_name,
            student_id: admin.student_id,
            email: admin.email,
            password_hash,
            photo_ref: DEFAULT_PHOTO.to_string(),
        };

        match state.users().insert(record).await {
            Ok(()) => {
                info!("seeded default administrator account");
                Ok(())
            }
            // Another starter won the race; the store is seeded either way
            Err(UserStoreError::DuplicateIdentifier | UserStoreError::DuplicateStudentId) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
