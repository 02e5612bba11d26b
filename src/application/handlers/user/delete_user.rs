//! DeleteUserHandler - Removes an account and everything it owns.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::UserError;
use crate::ports::UserRepository;

pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Profile, book sessions and reading sessions go with the user.
    pub async fn handle(&self, user_id: &UserId) -> Result<(), UserError> {
        self.users.delete(user_id).await?;
        tracing::info!(user_id = %user_id, "user deleted");
        Ok(())
    }
}
