//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::reading::{
    GetBookSessionHandler, GetReadingSessionHandler, ListBookSessionsHandler,
    ListReadingSessionsHandler,
};
use crate::application::handlers::user::{
    AuthenticateUserHandler, CreateProfileHandler, DeleteProfileHandler, DeleteUserHandler,
    GetCurrentUserHandler, GetProfileHandler, RegisterUserHandler, UpdateProfileHandler,
};
use crate::application::{BookSessionService, ReadingSessionService};
use crate::ports::{
    PasswordHasher, ProfileRepository, ReadingReader, ReadingStore, SessionValidator,
    TokenIssuer, UserRepository,
};

/// Cloned per request; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<dyn ReadingReader>,
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub validator: Arc<dyn SessionValidator>,
    pub book_sessions: Arc<BookSessionService>,
    pub reading_sessions: Arc<ReadingSessionService>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ReadingStore>,
        reader: Arc<dyn ReadingReader>,
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        validator: Arc<dyn SessionValidator>,
    ) -> Self {
        Self {
            book_sessions: Arc::new(BookSessionService::new(store.clone(), reader.clone())),
            reading_sessions: Arc::new(ReadingSessionService::new(store, reader.clone())),
            reader,
            users,
            profiles,
            hasher,
            tokens,
            validator,
        }
    }

    pub fn register_user_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.users.clone(), self.hasher.clone())
    }

    pub fn authenticate_user_handler(&self) -> AuthenticateUserHandler {
        AuthenticateUserHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn get_current_user_handler(&self) -> GetCurrentUserHandler {
        GetCurrentUserHandler::new(self.users.clone(), self.reader.clone())
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.users.clone())
    }

    pub fn create_profile_handler(&self) -> CreateProfileHandler {
        CreateProfileHandler::new(self.profiles.clone())
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.profiles.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.profiles.clone())
    }

    pub fn delete_profile_handler(&self) -> DeleteProfileHandler {
        DeleteProfileHandler::new(self.profiles.clone())
    }

    pub fn get_book_session_handler(&self) -> GetBookSessionHandler {
        GetBookSessionHandler::new(self.reader.clone())
    }

    pub fn list_book_sessions_handler(&self) -> ListBookSessionsHandler {
        ListBookSessionsHandler::new(self.reader.clone())
    }

    pub fn get_reading_session_handler(&self) -> GetReadingSessionHandler {
        GetReadingSessionHandler::new(self.reader.clone())
    }

    pub fn list_reading_sessions_handler(&self) -> ListReadingSessionsHandler {
        ListReadingSessionsHandler::new(self.reader.clone())
    }
}
