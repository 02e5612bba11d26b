//! Reading reader port (read side / queries).
//!
//! Non-transactional lookups used by query handlers and statistics. Results
//! reflect committed state only.

use async_trait::async_trait;

use crate::domain::foundation::{BookSessionId, DomainError, ReadingSessionId, UserId};
use crate::domain::reading::{BookSession, ReadingSession};

#[async_trait]
pub trait ReadingReader: Send + Sync {
    async fn get_book_session(&self, id: &BookSessionId) -> Result<Option<BookSession>, DomainError>;

    /// Book sessions owned by a user, most recently updated first.
    async fn list_book_sessions(&self, owner: &UserId) -> Result<Vec<BookSession>, DomainError>;

    async fn get_reading_session(
        &self,
        id: &ReadingSessionId,
    ) -> Result<Option<ReadingSession>, DomainError>;

    /// Reading sessions of one book, oldest first.
    async fn list_reading_sessions(
        &self,
        book_id: &BookSessionId,
    ) -> Result<Vec<ReadingSession>, DomainError>;

    /// Reading sessions across every book owned by a user, newest first.
    async fn list_reading_sessions_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ReadingSession>, DomainError>;

    /// `(total, finished)` book session counts for a user.
    async fn count_book_sessions(&self, owner: &UserId) -> Result<(u64, u64), DomainError>;
}
