//! Reading services.
//!
//! Each mutating method opens one unit of work, does its read-modify-write
//! through it and commits. Any error rolls the unit of work back.

mod book_session;
mod reading_session;

pub use book_session::BookSessionService;
pub use reading_session::ReadingSessionService;

use crate::domain::reading::ReadingError;
use crate::ports::ReadingUnitOfWork;

/// Commits `uow` when `result` is `Ok`, otherwise rolls it back and returns the error.
async fn complete<T>(
    uow: Box<dyn ReadingUnitOfWork>,
    result: Result<T, ReadingError>,
) -> Result<T, ReadingError> {
    match result {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if err.is_validation() {
                tracing::debug!(reason = %err, "reading operation rejected");
            } else {
                tracing::error!(error = %err, "reading operation failed");
            }
            if let Err(rollback_err) = uow.rollback().await {
                tracing::error!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Store decorators for observing and breaking units of work in tests.

    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{BookSessionId, DomainError, ReadingSessionId};
    use crate::domain::reading::{BookSession, ReadingSession};
    use crate::ports::{ReadingStore, ReadingUnitOfWork};

    /// Records every write a unit of work performs, in order.
    pub struct RecordingStore {
        inner: InMemoryStore,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingStore {
        pub fn new(inner: InMemoryStore) -> Self {
            Self {
                inner,
                log: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReadingStore for RecordingStore {
        async fn begin(&self) -> Result<Box<dyn ReadingUnitOfWork>, DomainError> {
            Ok(Box::new(RecordingUnitOfWork {
                inner: self.inner.begin().await?,
                log: self.log.clone(),
                fail_on: None,
            }))
        }
    }

    /// Fails the named write after letting every earlier write through.
    pub struct FailingStore {
        inner: InMemoryStore,
        fail_on: &'static str,
    }

    impl FailingStore {
        pub fn new(inner: InMemoryStore, fail_on: &'static str) -> Self {
            Self { inner, fail_on }
        }
    }

    #[async_trait]
    impl ReadingStore for FailingStore {
        async fn begin(&self) -> Result<Box<dyn ReadingUnitOfWork>, DomainError> {
            Ok(Box::new(RecordingUnitOfWork {
                inner: self.inner.begin().await?,
                log: Arc::new(Mutex::new(Vec::new())),
                fail_on: Some(self.fail_on),
            }))
        }
    }

    struct RecordingUnitOfWork {
        inner: Box<dyn ReadingUnitOfWork>,
        log: Arc<Mutex<Vec<String>>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingUnitOfWork {
        fn record(&self, op: &'static str, entry: String) -> Result<(), DomainError> {
            if self.fail_on == Some(op) {
                return Err(DomainError::database(format!("simulated {} failure", op)));
            }
            self.log.lock().unwrap().push(entry);
            Ok(())
        }
    }

    #[async_trait]
    impl ReadingUnitOfWork for RecordingUnitOfWork {
        async fn lock_book_session(
            &mut self,
            id: &BookSessionId,
        ) -> Result<Option<BookSession>, DomainError> {
            self.inner.lock_book_session(id).await
        }

        async fn insert_book_session(&mut self, book: &BookSession) -> Result<(), DomainError> {
            self.record("insert_book_session", format!("insert book {}", book.id))?;
            self.inner.insert_book_session(book).await
        }

        async fn update_book_session(&mut self, book: &BookSession) -> Result<(), DomainError> {
            self.record(
                "update_book_session",
                format!("update book {} finished={}", book.id, book.is_finished),
            )?;
            self.inner.update_book_session(book).await
        }

        async fn delete_book_session(&mut self, id: &BookSessionId) -> Result<(), DomainError> {
            self.record("delete_book_session", format!("delete book {}", id))?;
            self.inner.delete_book_session(id).await
        }

        async fn lock_reading_session(
            &mut self,
            id: &ReadingSessionId,
        ) -> Result<Option<ReadingSession>, DomainError> {
            self.inner.lock_reading_session(id).await
        }

        async fn reading_sessions_of(
            &mut self,
            book_id: &BookSessionId,
        ) -> Result<Vec<ReadingSession>, DomainError> {
            self.inner.reading_sessions_of(book_id).await
        }

        async fn insert_reading_session(
            &mut self,
            session: &ReadingSession,
        ) -> Result<(), DomainError> {
            self.record("insert_reading_session", format!("insert reading {}", session.id))?;
            self.inner.insert_reading_session(session).await
        }

        async fn update_reading_session(
            &mut self,
            session: &ReadingSession,
        ) -> Result<(), DomainError> {
            self.record(
                "update_reading_session",
                format!(
                    "update reading {} ended={}",
                    session.id,
                    session.end_time.is_some()
                ),
            )?;
            self.inner.update_reading_session(session).await
        }

        async fn delete_reading_session(
            &mut self,
            id: &ReadingSessionId,
        ) -> Result<(), DomainError> {
            self.record("delete_reading_session", format!("delete reading {}", id))?;
            self.inner.delete_reading_session(id).await
        }

        async fn commit(self: Box<Self>) -> Result<(), DomainError> {
            self.log.lock().unwrap().push("commit".to_string());
            self.inner.commit().await
        }

        async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
            self.log.lock().unwrap().push("rollback".to_string());
            self.inner.rollback().await
        }
    }
}
