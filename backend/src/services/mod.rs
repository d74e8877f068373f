//! Business logic services
//!
//! Services sit between the HTTP routes and the persistence
//! repositories. They own validation, credential checks, and the
//! coordination between the user record store, the session store, and
//! the uploaded asset directory.

pub mod profile;
pub mod user;

pub use profile::{PhotoUpload, ProfileService};
pub use user::AuthService;
