//! DeleteProfileHandler - Command handler for removing an owned profile.

use std::sync::Arc;

use crate::domain::foundation::{ProfileId, UserId};
use crate::domain::user::UserError;
use crate::ports::ProfileRepository;

use super::{GetProfileHandler, GetProfileQuery};

#[derive(Debug, Clone)]
pub struct DeleteProfileCommand {
    pub profile_id: ProfileId,
    pub user_id: UserId,
}

pub struct DeleteProfileHandler {
    repository: Arc<dyn ProfileRepository>,
}

impl DeleteProfileHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteProfileCommand) -> Result<(), UserError> {
        let profile = GetProfileHandler::new(self.repository.clone())
            .handle(GetProfileQuery {
                profile_id: cmd.profile_id,
                user_id: cmd.user_id,
            })
            .await?;

        self.repository.delete(&profile.id).await?;

        tracing::info!(profile_id = %profile.id, "profile deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::user::{
        CreateProfileCommand, CreateProfileHandler, UpdateProfileCommand, UpdateProfileHandler,
    };
    use crate::domain::user::{NewProfile, Profile, ProfileChanges};

    async fn seeded(store: &Arc<InMemoryStore>, owner: UserId) -> Profile {
        CreateProfileHandler::new(store.clone())
            .handle(CreateProfileCommand {
                user_id: owner,
                fields: NewProfile::default(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn owner_can_update_then_delete() {
        let store = Arc::new(InMemoryStore::new());
        let owner = UserId::new();
        let profile = seeded(&store, owner).await;

        let updated = UpdateProfileHandler::new(store.clone())
            .handle(UpdateProfileCommand {
                profile_id: profile.id,
                user_id: owner,
                changes: ProfileChanges {
                    bio: Some("Mostly poetry".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(updated.bio, "Mostly poetry");

        DeleteProfileHandler::new(store.clone())
            .handle(DeleteProfileCommand {
                profile_id: profile.id,
                user_id: owner,
            })
            .await
            .unwrap();
        assert!(ProfileRepository::find_by_id(store.as_ref(), &profile.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn other_users_see_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let profile = seeded(&store, UserId::new()).await;
        let stranger = UserId::new();

        let update = UpdateProfileHandler::new(store.clone())
            .handle(UpdateProfileCommand {
                profile_id: profile.id,
                user_id: stranger,
                changes: ProfileChanges::default(),
            })
            .await;
        let delete = DeleteProfileHandler::new(store.clone())
            .handle(DeleteProfileCommand {
                profile_id: profile.id,
                user_id: stranger,
            })
            .await;

        assert_eq!(update, Err(UserError::ProfileNotFound));
        assert_eq!(delete, Err(UserError::ProfileNotFound));
        assert!(ProfileRepository::find_by_id(store.as_ref(), &profile.id)
            .await
            .unwrap()
            .is_some());
    }
}
