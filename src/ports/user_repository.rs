//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a newly registered user.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if another user already has this email
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Lookup by normalized (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Delete a user together with its profile, book sessions and reading sessions.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user does not exist
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
