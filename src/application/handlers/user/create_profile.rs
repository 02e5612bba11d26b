//! CreateProfileHandler - Command handler for attaching a profile to a user.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{NewProfile, Profile, UserError};
use crate::ports::ProfileRepository;

#[derive(Debug, Clone)]
pub struct CreateProfileCommand {
    pub user_id: UserId,
    pub fields: NewProfile,
}

pub struct CreateProfileHandler {
    repository: Arc<dyn ProfileRepository>,
}

impl CreateProfileHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// `ProfileExists` if the user already has a profile.
    pub async fn handle(&self, cmd: CreateProfileCommand) -> Result<Profile, UserError> {
        if self.repository.find_by_user(&cmd.user_id).await?.is_some() {
            return Err(UserError::ProfileExists);
        }

        let profile = Profile::create(cmd.user_id, cmd.fields, Timestamp::now())?;
        self.repository.create(&profile).await?;

        tracing::info!(profile_id = %profile.id, user_id = %cmd.user_id, "profile created");
        Ok(profile)
    }
}
