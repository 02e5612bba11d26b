//! Profile repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProfileId, UserId};
use crate::domain::user::Profile;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// # Errors
    ///
    /// - `ProfileExists` if the user already has a profile
    async fn create(&self, profile: &Profile) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ProfileNotFound` if the profile does not exist
    async fn update(&self, profile: &Profile) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError>;

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// # Errors
    ///
    /// - `ProfileNotFound` if the profile does not exist
    async fn delete(&self, id: &ProfileId) -> Result<(), DomainError>;
}
