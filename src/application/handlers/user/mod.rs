//! User/Profile application handlers.
//!
//! Command and query handlers for accounts, login and profiles.

mod authenticate_user;
mod create_profile;
mod delete_profile;
mod delete_user;
mod get_current_user;
mod get_profile;
mod register_user;
mod update_profile;

pub use authenticate_user::{
    AuthenticateUserCommand, AuthenticateUserHandler, AuthenticateUserResult,
};
pub use create_profile::{CreateProfileCommand, CreateProfileHandler};
pub use delete_profile::{DeleteProfileCommand, DeleteProfileHandler};
pub use delete_user::DeleteUserHandler;
pub use get_current_user::{CurrentUserView, GetCurrentUserHandler};
pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
