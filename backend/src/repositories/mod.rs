//! Persistence repositories
//!
//! Provides the file-backed data access layer: the user record store and
//! the session store.

pub mod session;
pub mod user;

pub use session::{Session, SessionStore};
pub use user::{UserRecord, UserStore, UserStoreError, DEFAULT_PHOTO};
