//! UpdateProfileHandler - Command handler for partial profile updates.

use std::sync::Arc;

use crate::domain::foundation::{ProfileId, Timestamp, UserId};
use crate::domain::user::{Profile, ProfileChanges, UserError};
use crate::ports::ProfileRepository;

use super::{GetProfileHandler, GetProfileQuery};

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub profile_id: ProfileId,
    pub user_id: UserId,
    pub changes: ProfileChanges,
}

pub struct UpdateProfileHandler {
    repository: Arc<dyn ProfileRepository>,
}

impl UpdateProfileHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<Profile, UserError> {
        let mut profile = GetProfileHandler::new(self.repository.clone())
            .handle(GetProfileQuery {
                profile_id: cmd.profile_id,
                user_id: cmd.user_id,
            })
            .await?;

        profile.apply(cmd.changes, Timestamp::now())?;
        self.repository.update(&profile).await?;

        tracing::info!(profile_id = %profile.id, "profile updated");
        Ok(profile)
    }
}
