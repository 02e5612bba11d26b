//! AuthenticateUserHandler - Verifies credentials and issues a bearer token.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, UserId};
use crate::domain::user::{normalize_email, PasswordHash, UserError};
use crate::ports::{IssuedToken, PasswordHasher, TokenIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct AuthenticateUserCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AuthenticateUserResult {
    pub user_id: UserId,
    pub token: IssuedToken,
}

pub struct AuthenticateUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    /// Checked against when the email is unknown, so both rejections cost one verify.
    decoy: PasswordHash,
}

impl AuthenticateUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        let decoy = hasher.hash("book-dogs-decoy-password");
        Self {
            users,
            hasher,
            tokens,
            decoy,
        }
    }

    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown email or a wrong password alike.
    pub async fn handle(
        &self,
        cmd: AuthenticateUserCommand,
    ) -> Result<AuthenticateUserResult, UserError> {
        let email = normalize_email(&cmd.email).map_err(|_| UserError::InvalidCredentials)?;

        let user = self.users.find_by_email(&email).await?;
        let hash = user.as_ref().map_or(&self.decoy, |user| &user.password_hash);
        let verified = self.hasher.verify(&cmd.password, hash);

        let user = match user {
            Some(user) if verified => user,
            _ => {
                tracing::debug!("login rejected");
                return Err(UserError::InvalidCredentials);
            }
        };

        let token = self
            .tokens
            .issue(&AuthenticatedUser::new(user.id, user.email.clone()))
            .map_err(|e| UserError::Infrastructure(e.to_string()))?;

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(AuthenticateUserResult {
            user_id: user.id,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{HmacPasswordHasher, JwtTokenService};
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::user::{RegisterUserCommand, RegisterUserHandler};
    use crate::ports::SessionValidator;
    use secrecy::Secret;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts `verify` calls on top of the real hasher.
    struct CountingHasher {
        inner: HmacPasswordHasher,
        verifications: AtomicUsize,
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, password: &str) -> PasswordHash {
            self.inner.hash(password)
        }

        fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
            self.verifications.fetch_add(1, Ordering::SeqCst);
            self.inner.verify(password, hash)
        }
    }

    struct Fixture {
        register: RegisterUserHandler,
        login: AuthenticateUserHandler,
        tokens: Arc<JwtTokenService>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let hasher = Arc::new(HmacPasswordHasher::new(Secret::new("pepper".to_string())));
        let tokens = Arc::new(JwtTokenService::new(
            &Secret::new("login-test-secret-login-test-secret".to_string()),
            "book-dogs",
            600,
        ));
        Fixture {
            register: RegisterUserHandler::new(store.clone(), hasher.clone()),
            login: AuthenticateUserHandler::new(store, hasher, tokens.clone()),
            tokens,
        }
    }

    fn login(email: &str, password: &str) -> AuthenticateUserCommand {
        AuthenticateUserCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_issue_token_for_user() {
        let f = fixture();
        let user = f
            .register
            .handle(RegisterUserCommand {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "engine".to_string(),
            })
            .await
            .unwrap();

        let result = f.login.handle(login(" ADA@example.com", "engine")).await.unwrap();

        assert_eq!(result.user_id, user.id);
        let caller = f.tokens.validate(&result.token.token).await.unwrap();
        assert_eq!(caller.id, user.id);
        assert_eq!(caller.email, "ada@example.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let f = fixture();
        f.register
            .handle(RegisterUserCommand {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "engine".to_string(),
            })
            .await
            .unwrap();

        let wrong_password = f.login.handle(login("ada@example.com", "Engine")).await;
        let unknown = f.login.handle(login("nobody@example.com", "engine")).await;

        assert_eq!(wrong_password.unwrap_err(), UserError::InvalidCredentials);
        assert_eq!(unknown.unwrap_err(), UserError::InvalidCredentials);
    }

    #[tokio::test]
    async fn unknown_email_still_runs_one_verification() {
        let store = Arc::new(InMemoryStore::new());
        let hasher = Arc::new(CountingHasher {
            inner: HmacPasswordHasher::new(Secret::new("pepper".to_string())),
            verifications: AtomicUsize::new(0),
        });
        let tokens = Arc::new(JwtTokenService::new(
            &Secret::new("login-test-secret-login-test-secret".to_string()),
            "book-dogs",
            600,
        ));
        let register = RegisterUserHandler::new(store.clone(), hasher.clone());
        let login_handler = AuthenticateUserHandler::new(store, hasher.clone(), tokens);

        register
            .handle(RegisterUserCommand {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "engine".to_string(),
            })
            .await
            .unwrap();

        let unknown = login_handler.handle(login("nobody@example.com", "engine")).await;
        assert_eq!(unknown.unwrap_err(), UserError::InvalidCredentials);
        assert_eq!(hasher.verifications.load(Ordering::SeqCst), 1);

        let wrong = login_handler.handle(login("ada@example.com", "Engine")).await;
        assert_eq!(wrong.unwrap_err(), UserError::InvalidCredentials);
        assert_eq!(hasher.verifications.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn decoy_password_does_not_log_in_unknown_email() {
        let f = fixture();
        let result = f
            .login
            .handle(login("nobody@example.com", "book-dogs-decoy-password"))
            .await;
        assert_eq!(result.unwrap_err(), UserError::InvalidCredentials);
    }
}
