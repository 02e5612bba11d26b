//! In-memory implementation of every persistence port.
//!
//! Useful for tests and local development. A unit of work takes the single
//! store lock for its whole lifetime and edits a staged copy of the state,
//! which replaces the shared state only on commit.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::{
    BookSessionId, DomainError, ErrorCode, ProfileId, ReadingSessionId, UserId,
};
use crate::domain::reading::{BookSession, ReadingSession};
use crate::domain::user::{Profile, User};
use crate::ports::{
    ProfileRepository, ReadingReader, ReadingStore, ReadingUnitOfWork, UserRepository,
};

#[derive(Debug, Clone, Default)]
struct State {
    users: HashMap<UserId, User>,
    profiles: HashMap<ProfileId, Profile>,
    books: HashMap<BookSessionId, BookSession>,
    readings: HashMap<ReadingSessionId, ReadingSession>,
}

impl State {
    fn readings_of(&self, book_id: &BookSessionId) -> Vec<ReadingSession> {
        let mut sessions: Vec<ReadingSession> = self
            .readings
            .values()
            .filter(|s| &s.book_session_id == book_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| (s.start_time, s.created_at));
        sessions
    }

    fn delete_book(&mut self, id: &BookSessionId) {
        self.books.remove(id);
        self.readings.retain(|_, s| &s.book_session_id != id);
    }
}

/// Shared in-memory store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    pub async fn book_session(&self, id: &BookSessionId) -> Option<BookSession> {
        self.state.lock().await.books.get(id).cloned()
    }

    pub async fn reading_session(&self, id: &ReadingSessionId) -> Option<ReadingSession> {
        self.state.lock().await.readings.get(id).cloned()
    }

    pub async fn book_session_count(&self) -> usize {
        self.state.lock().await.books.len()
    }

    pub async fn reading_session_count(&self) -> usize {
        self.state.lock().await.readings.len()
    }
}

#[async_trait]
impl ReadingStore for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn ReadingUnitOfWork>, DomainError> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryUnitOfWork { guard, staged }))
    }
}

struct InMemoryUnitOfWork {
    guard: OwnedMutexGuard<State>,
    staged: State,
}

#[async_trait]
impl ReadingUnitOfWork for InMemoryUnitOfWork {
    async fn lock_book_session(
        &mut self,
        id: &BookSessionId,
    ) -> Result<Option<BookSession>, DomainError> {
        Ok(self.staged.books.get(id).cloned())
    }

    async fn insert_book_session(&mut self, book: &BookSession) -> Result<(), DomainError> {
        self.staged.books.insert(book.id, book.clone());
        Ok(())
    }

    async fn update_book_session(&mut self, book: &BookSession) -> Result<(), DomainError> {
        match self.staged.books.get_mut(&book.id) {
            Some(stored) => {
                *stored = book.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::BookSessionNotFound,
                format!("Book session not found: {}", book.id),
            )),
        }
    }

    async fn delete_book_session(&mut self, id: &BookSessionId) -> Result<(), DomainError> {
        self.staged.delete_book(id);
        Ok(())
    }

    async fn lock_reading_session(
        &mut self,
        id: &ReadingSessionId,
    ) -> Result<Option<ReadingSession>, DomainError> {
        Ok(self.staged.readings.get(id).cloned())
    }

    async fn reading_sessions_of(
        &mut self,
        book_id: &BookSessionId,
    ) -> Result<Vec<ReadingSession>, DomainError> {
        Ok(self.staged.readings_of(book_id))
    }

    async fn insert_reading_session(&mut self, session: &ReadingSession) -> Result<(), DomainError> {
        if !self.staged.books.contains_key(&session.book_session_id) {
            return Err(DomainError::new(
                ErrorCode::BookSessionNotFound,
                format!("Book session not found: {}", session.book_session_id),
            ));
        }
        let has_active = self
            .staged
            .readings
            .values()
            .any(|s| s.book_session_id == session.book_session_id && s.is_active());
        if session.is_active() && has_active {
            return Err(DomainError::new(
                ErrorCode::ActiveSessionExists,
                format!("Book session {} already has an active reading session", session.book_session_id),
            ));
        }
        self.staged.readings.insert(session.id, session.clone());
        Ok(())
    }

    async fn update_reading_session(&mut self, session: &ReadingSession) -> Result<(), DomainError> {
        match self.staged.readings.get_mut(&session.id) {
            Some(stored) => {
                *stored = session.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ReadingSessionNotFound,
                format!("Reading session not found: {}", session.id),
            )),
        }
    }

    async fn delete_reading_session(&mut self, id: &ReadingSessionId) -> Result<(), DomainError> {
        self.staged.readings.remove(id);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let InMemoryUnitOfWork { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl ReadingReader for InMemoryStore {
    async fn get_book_session(&self, id: &BookSessionId) -> Result<Option<BookSession>, DomainError> {
        Ok(self.book_session(id).await)
    }

    async fn list_book_sessions(&self, owner: &UserId) -> Result<Vec<BookSession>, DomainError> {
        let state = self.state.lock().await;
        let mut books: Vec<BookSession> = state
            .books
            .values()
            .filter(|b| b.is_owned_by(owner))
            .cloned()
            .collect();
        books.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(books)
    }

    async fn get_reading_session(
        &self,
        id: &ReadingSessionId,
    ) -> Result<Option<ReadingSession>, DomainError> {
        Ok(self.reading_session(id).await)
    }

    async fn list_reading_sessions(
        &self,
        book_id: &BookSessionId,
    ) -> Result<Vec<ReadingSession>, DomainError> {
        Ok(self.state.lock().await.readings_of(book_id))
    }

    async fn list_reading_sessions_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ReadingSession>, DomainError> {
        let state = self.state.lock().await;
        let mut sessions: Vec<ReadingSession> = state
            .readings
            .values()
            .filter(|s| {
                state
                    .books
                    .get(&s.book_session_id)
                    .is_some_and(|b| b.is_owned_by(owner))
            })
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(sessions)
    }

    async fn count_book_sessions(&self, owner: &UserId) -> Result<(u64, u64), DomainError> {
        let state = self.state.lock().await;
        let (total, finished) = state
            .books
            .values()
            .filter(|b| b.is_owned_by(owner))
            .fold((0, 0), |(total, finished), b| {
                (total + 1, finished + u64::from(b.is_finished))
            });
        Ok((total, finished))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                format!("Email already registered: {}", user.email),
            ));
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.lock().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        if state.users.remove(id).is_none() {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", id),
            ));
        }

        state.profiles.retain(|_, p| &p.user_id != id);
        let owned: Vec<BookSessionId> = state
            .books
            .values()
            .filter(|b| b.is_owned_by(id))
            .map(|b| b.id)
            .collect();
        for book_id in &owned {
            state.delete_book(book_id);
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn create(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        if state.profiles.values().any(|p| p.user_id == profile.user_id) {
            return Err(DomainError::new(
                ErrorCode::ProfileExists,
                format!("Profile already exists for user {}", profile.user_id),
            ));
        }
        state.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        match state.profiles.get_mut(&profile.id) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found: {}", profile.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError> {
        Ok(self.state.lock().await.profiles.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.profiles.values().find(|p| &p.user_id == user_id).cloned())
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), DomainError> {
        match self.state.lock().await.profiles.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found: {}", id),
            )),
        }
    }
}
