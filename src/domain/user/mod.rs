//! User domain module.
//!
//! Registered users and their optional one-to-one profile. A user owns
//! book sessions; deleting the user removes everything it owns.

mod errors;
mod profile;
#[allow(clippy::module_inception)]
mod user;

pub use errors::UserError;
pub use profile::{NewProfile, Profile, ProfileChanges};
pub use user::{normalize_email, validate_password, PasswordHash, User};
