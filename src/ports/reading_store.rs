//! Reading store port (write side).
//!
//! Every mutating book/reading session operation runs inside one unit of
//! work obtained from [`ReadingStore::begin`].
//!
//! # Contract
//!
//! - Writes made through a unit of work are invisible to other units of work
//!   until [`ReadingUnitOfWork::commit`] succeeds.
//! - Dropping a unit of work without committing discards every write, exactly
//!   like [`ReadingUnitOfWork::rollback`].
//! - `lock_*` methods return the current persisted row and prevent concurrent
//!   units of work from mutating it until this one ends. Callers lock the
//!   parent book session before touching its reading sessions.

use async_trait::async_trait;

use crate::domain::foundation::{BookSessionId, DomainError, ReadingSessionId};
use crate::domain::reading::{BookSession, ReadingSession};

/// Factory for transactional units of work.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Opens a new transaction.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if no connection or transaction could be acquired
    async fn begin(&self) -> Result<Box<dyn ReadingUnitOfWork>, DomainError>;
}

/// One open transaction over book and reading sessions.
#[async_trait]
pub trait ReadingUnitOfWork: Send {
    /// Reads and locks a book session. `None` if it does not exist.
    async fn lock_book_session(
        &mut self,
        id: &BookSessionId,
    ) -> Result<Option<BookSession>, DomainError>;

    async fn insert_book_session(&mut self, book: &BookSession) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `BookSessionNotFound` if the row is gone
    async fn update_book_session(&mut self, book: &BookSession) -> Result<(), DomainError>;

    /// Deletes a book session and, by cascade, its reading sessions.
    async fn delete_book_session(&mut self, id: &BookSessionId) -> Result<(), DomainError>;

    /// Reads and locks a reading session. `None` if it does not exist.
    async fn lock_reading_session(
        &mut self,
        id: &ReadingSessionId,
    ) -> Result<Option<ReadingSession>, DomainError>;

    /// All reading sessions of a book, oldest first.
    async fn reading_sessions_of(
        &mut self,
        book_id: &BookSessionId,
    ) -> Result<Vec<ReadingSession>, DomainError>;

    /// # Errors
    ///
    /// - `ActiveSessionExists` if the book already has an active session
    async fn insert_reading_session(&mut self, session: &ReadingSession) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ReadingSessionNotFound` if the row is gone
    async fn update_reading_session(&mut self, session: &ReadingSession) -> Result<(), DomainError>;

    async fn delete_reading_session(&mut self, id: &ReadingSessionId) -> Result<(), DomainError>;

    /// Makes every write of this unit of work durable and visible.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;

    /// Discards every write of this unit of work.
    async fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ReadingStore) {}
        fn _accepts_uow(_uow: Box<dyn ReadingUnitOfWork>) {}
    }
}
