//! RegisterUserHandler - Command handler for creating accounts.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::user::{validate_password, User, UserError};
use crate::ports::{PasswordHasher, UserRepository};

/// Command to register a new user.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Handler for registering users.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<User, UserError> {
        validate_password(&cmd.password)?;

        let hash = self.hasher.hash(&cmd.password);
        let user = User::register(&cmd.name, &cmd.email, hash, Timestamp::now())?;

        self.users.save(&user).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}
