//! GetProfileHandler - Query handler for one owned profile.

use std::sync::Arc;

use crate::domain::foundation::{ProfileId, UserId};
use crate::domain::user::{Profile, UserError};
use crate::ports::ProfileRepository;

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub profile_id: ProfileId,
    pub user_id: UserId,
}

pub struct GetProfileHandler {
    repository: Arc<dyn ProfileRepository>,
}

impl GetProfileHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Profiles of other users are reported as `ProfileNotFound`.
    pub async fn handle(&self, query: GetProfileQuery) -> Result<Profile, UserError> {
        match self.repository.find_by_id(&query.profile_id).await? {
            Some(profile) if profile.user_id == query.user_id => Ok(profile),
            _ => Err(UserError::ProfileNotFound),
        }
    }
}
