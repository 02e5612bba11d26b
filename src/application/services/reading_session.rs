//! ReadingSessionService - lifecycle of reading sessions and their effect on the parent book.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::foundation::Timestamp;
use crate::domain::reading::statistics::{self, SessionStats};
use crate::domain::reading::{
    BookSession, NewReadingSession, ReadingError, ReadingSession, ReadingSessionChanges,
};
use crate::ports::{ReadingReader, ReadingStore, ReadingUnitOfWork};

use super::complete;

pub struct ReadingSessionService {
    store: Arc<dyn ReadingStore>,
    reader: Arc<dyn ReadingReader>,
}

impl ReadingSessionService {
    pub fn new(store: Arc<dyn ReadingStore>, reader: Arc<dyn ReadingReader>) -> Self {
        Self { store, reader }
    }

    /// Starts a reading session on `book` at the current time.
    ///
    /// # Errors
    ///
    /// `Validation` if the book already has an active session or is finished.
    pub async fn start(
        &self,
        book: &BookSession,
        fields: NewReadingSession,
    ) -> Result<ReadingSession, ReadingError> {
        let mut uow = self.store.begin().await?;
        let result = start_within(uow.as_mut(), book, fields, Timestamp::now()).await;
        let session = complete(uow, result).await?;

        tracing::info!(
            reading_session_id = %session.id,
            book_session_id = %book.id,
            "reading session started"
        );
        Ok(session)
    }

    /// Ends `session` now, optionally recording pages and notes.
    ///
    /// Marks the parent book finished when its progress reaches 100%.
    pub async fn end(
        &self,
        session: &ReadingSession,
        pages_read: Option<u32>,
        notes: Option<String>,
    ) -> Result<ReadingSession, ReadingError> {
        let mut uow = self.store.begin().await?;
        let result = end_locked(uow.as_mut(), session, pages_read, notes, Timestamp::now()).await;
        let ended = complete(uow, result).await?;

        tracing::info!(
            reading_session_id = %ended.id,
            pages_read = ended.pages_read,
            "reading session ended"
        );
        Ok(ended)
    }

    /// # Errors
    ///
    /// `Validation` if the session has ended and `changes.pages_read` is set.
    pub async fn update(
        &self,
        session: &ReadingSession,
        changes: ReadingSessionChanges,
    ) -> Result<ReadingSession, ReadingError> {
        let mut uow = self.store.begin().await?;
        let result = update_within(uow.as_mut(), session, changes, Timestamp::now()).await;
        let updated = complete(uow, result).await?;

        tracing::info!(reading_session_id = %updated.id, "reading session updated");
        Ok(updated)
    }

    /// Deletes `session`; the parent book loses its finished flag if progress drops below 100%.
    pub async fn delete(&self, session: &ReadingSession) -> Result<(), ReadingError> {
        let mut uow = self.store.begin().await?;
        let result = delete_within(uow.as_mut(), session, Timestamp::now()).await;
        let reopened = complete(uow, result).await?;

        tracing::info!(
            reading_session_id = %session.id,
            book_session_id = %session.book_session_id,
            book_reopened = reopened,
            "reading session deleted"
        );
        Ok(())
    }

    pub fn calculate_duration(&self, session: &ReadingSession) -> Duration {
        statistics::calculate_duration(session)
    }

    pub fn get_session_stats(&self, session: &ReadingSession) -> SessionStats {
        statistics::session_stats(session)
    }

    /// The reading sessions of `book`, oldest first.
    pub async fn sessions_of(&self, book: &BookSession) -> Result<Vec<ReadingSession>, ReadingError> {
        Ok(self.reader.list_reading_sessions(&book.id).await?)
    }
}

async fn start_within(
    uow: &mut dyn ReadingUnitOfWork,
    book: &BookSession,
    fields: NewReadingSession,
    now: Timestamp,
) -> Result<ReadingSession, ReadingError> {
    let current = uow
        .lock_book_session(&book.id)
        .await?
        .ok_or(ReadingError::BookSessionNotFound(book.id))?;

    let sessions = uow.reading_sessions_of(&book.id).await?;
    if sessions.iter().any(ReadingSession::is_active) {
        return Err(ReadingError::active_session_exists());
    }
    if current.is_finished {
        return Err(ReadingError::book_finished());
    }

    let session = ReadingSession::start(book.id, fields, now);
    uow.insert_reading_session(&session).await?;
    Ok(session)
}

/// Locks the parent book first, then the session itself.
async fn lock_pair(
    uow: &mut dyn ReadingUnitOfWork,
    session: &ReadingSession,
) -> Result<(BookSession, ReadingSession), ReadingError> {
    let not_found = || ReadingError::ReadingSessionNotFound(session.id);

    let book = uow
        .lock_book_session(&session.book_session_id)
        .await?
        .ok_or_else(not_found)?;
    let current = uow
        .lock_reading_session(&session.id)
        .await?
        .ok_or_else(not_found)?;
    Ok((book, current))
}

async fn end_locked(
    uow: &mut dyn ReadingUnitOfWork,
    session: &ReadingSession,
    pages_read: Option<u32>,
    notes: Option<String>,
    now: Timestamp,
) -> Result<ReadingSession, ReadingError> {
    let (mut book, mut current) = lock_pair(uow, session).await?;
    end_within(uow, &mut book, &mut current, pages_read, notes, now).await?;
    Ok(current)
}

async fn update_within(
    uow: &mut dyn ReadingUnitOfWork,
    session: &ReadingSession,
    changes: ReadingSessionChanges,
    now: Timestamp,
) -> Result<ReadingSession, ReadingError> {
    let (_, mut current) = lock_pair(uow, session).await?;
    current.apply(changes, now)?;
    uow.update_reading_session(&current).await?;
    Ok(current)
}

/// Ends `session` and auto-completes `book` when its progress reaches 100%.
///
/// `book` must already be locked by `uow`.
pub(super) async fn end_within(
    uow: &mut dyn ReadingUnitOfWork,
    book: &mut BookSession,
    session: &mut ReadingSession,
    pages_read: Option<u32>,
    notes: Option<String>,
    now: Timestamp,
) -> Result<(), ReadingError> {
    session.end(now, pages_read, notes)?;
    uow.update_reading_session(session).await?;

    let sessions = uow.reading_sessions_of(&book.id).await?;
    if !book.is_finished && statistics::calculate_progress(book, &sessions).is_complete() {
        book.mark_finished(now);
        uow.update_book_session(book).await?;
    }
    Ok(())
}

/// Returns whether the parent book was reopened.
async fn delete_within(
    uow: &mut dyn ReadingUnitOfWork,
    session: &ReadingSession,
    now: Timestamp,
) -> Result<bool, ReadingError> {
    let (mut book, current) = lock_pair(uow, session).await?;
    uow.delete_reading_session(&current.id).await?;

    let remaining = uow.reading_sessions_of(&book.id).await?;
    if book.is_finished && !statistics::calculate_progress(&book, &remaining).is_complete() {
        book.mark_unfinished(now);
        uow.update_book_session(&book).await?;
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::services::test_support::FailingStore;
    use crate::application::services::BookSessionService;
    use crate::domain::foundation::{BookSessionId, UserId};
    use crate::domain::reading::{BookSessionChanges, NewBookSession};

    fn services(store: &InMemoryStore) -> (BookSessionService, ReadingSessionService) {
        let shared = Arc::new(store.clone());
        (
            BookSessionService::new(shared.clone(), shared.clone()),
            ReadingSessionService::new(shared.clone(), shared),
        )
    }

    async fn book(books: &BookSessionService, page_number: i32) -> BookSession {
        books
            .create(
                &UserId::new(),
                NewBookSession {
                    title: "Piranesi".to_string(),
                    page_number,
                    ..Default::default()
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn start_creates_active_session() {
        let store = InMemoryStore::new();
        let (books, readings) = services(&store);
        let book = book(&books, 250).await;

        let session = readings
            .start(
                &book,
                NewReadingSession {
                    pages_read: None,
                    notes: Some("on the train".to_string()),
                },
            )
            .await
            .unwrap();

        assert!(session.is_active());
        assert_eq!(session.book_session_id, book.id);
        assert_eq!(session.notes, "on the train");
        assert!(store.reading_session(&session.id).await.is_some());
    }

    #[tokio::test]
    async fn second_start_while_active_fails() {
        let store = InMemoryStore::new();
        let (books, readings) = services(&store);
        let book = book(&books, 250).await;
        readings.start(&book, NewReadingSession::default()).await.unwrap();

        let second = readings
            .start(
                &book,
                NewReadingSession {
                    pages_read: Some(50),
                    notes: Some("different fields".to_string()),
                },
            )
            .await;

        assert_eq!(second, Err(ReadingError::active_session_exists()));
        assert_eq!(readings.sessions_of(&book).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_starts_admit_exactly_one() {
        let store = InMemoryStore::new();
        let (books, _) = services(&store);
        let book = book(&books, 250).await;
        let readings = Arc::new(services(&store).1);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let readings = readings.clone();
            let book = book.clone();
            handles.push(tokio::spawn(async move {
                readings.start(&book, NewReadingSession::default()).await
            }));
        }

        let mut started = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => started += 1,
                Err(err) => assert_eq!(err, ReadingError::active_session_exists()),
            }
        }
        assert_eq!(started, 1);
    }

    #[tokio::test]
    async fn start_on_finished_book_fails() {
        let store = InMemoryStore::new();
        let (books, readings) = services(&store);
        let book = book(&books, 250).await;
        let book = books
            .update(
                &book,
                BookSessionChanges {
                    is_finished: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let result = readings.start(&book, NewReadingSession::default()).await;

        assert_eq!(result, Err(ReadingError::book_finished()));
    }

    #[tokio::test]
    async fn ending_twice_fails_and_keeps_first_end() {
        let store = InMemoryStore::new();
        let (books, readings) = services(&store);
        let book = book(&books, 250).await;
        let session = readings.start(&book, NewReadingSession::default()).await.unwrap();

        let ended = readings.end(&session, Some(12), None).await.unwrap();
        let again = readings.end(&ended, Some(99), None).await;

        assert_eq!(again, Err(ReadingError::already_ended()));
        let stored = store.reading_session(&session.id).await.unwrap();
        assert_eq!(stored.pages_read, 12);
        assert_eq!(stored.end_time, ended.end_time);
    }

    #[tokio::test]
    async fn ending_past_total_pages_finishes_book() {
        let store = InMemoryStore::new();
        let (books, readings) = services(&store);
        let book = book(&books, 100).await;

        let a = readings.start(&book, NewReadingSession::default()).await.unwrap();
        readings.end(&a, Some(40), None).await.unwrap();
        assert!(!store.book_session(&book.id).await.unwrap().is_finished);

        let b = readings.start(&book, NewReadingSession::default()).await.unwrap();
        readings.end(&b, Some(65), None).await.unwrap();

        let stored = store.book_session(&book.id).await.unwrap();
        assert!(stored.is_finished);
        assert_eq!(books.calculate_progress(&stored).await.unwrap().value(), 100);
    }

    #[tokio::test]
    async fn update_of_ended_session_rejects_pages_but_keeps_notes_path() {
        let store = InMemoryStore::new();
        let (books, readings) = services(&store);
        let book = book(&books, 250).await;
        let session = readings.start(&book, NewReadingSession::default()).await.unwrap();
        let ended = readings.end(&session, Some(20), None).await.unwrap();

        let rejected = readings
            .update(
                &ended,
                ReadingSessionChanges {
                    pages_read: Some(21),
                    ..Default::default()
                },
            )
            .await;
        assert_eq!(rejected, Err(ReadingError::pages_read_locked()));

        let noted = readings
            .update(
                &ended,
                ReadingSessionChanges {
                    notes: Some("re-read chapter 3".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(noted.notes, "re-read chapter 3");
        assert_eq!(noted.pages_read, 20);
    }

    #[tokio::test]
    async fn update_of_active_session_changes_pages() {
        let store = InMemoryStore::new();
        let (books, readings) = services(&store);
        let book = book(&books, 250).await;
        let session = readings.start(&book, NewReadingSession::default()).await.unwrap();

        let updated = readings
            .update(
                &session,
                ReadingSessionChanges {
                    pages_read: Some(7),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.pages_read, 7);
        assert!(updated.is_active());
    }

    #[tokio::test]
    async fn deleting_only_session_of_finished_book_reopens_it() {
        let store = InMemoryStore::new();
        let (books, readings) = services(&store);
        let book = book(&books, 100).await;
        let session = readings.start(&book, NewReadingSession::default()).await.unwrap();
        let ended = readings.end(&session, Some(100), None).await.unwrap();
        assert!(store.book_session(&book.id).await.unwrap().is_finished);

        readings.delete(&ended).await.unwrap();

        let stored = store.book_session(&book.id).await.unwrap();
        assert!(!stored.is_finished);
        assert_eq!(books.calculate_progress(&stored).await.unwrap().value(), 0);
    }

    #[tokio::test]
    async fn failed_end_rolls_back_session_and_book() {
        let store = InMemoryStore::new();
        let (books, readings) = services(&store);
        let book = book(&books, 100).await;
        let session = readings.start(&book, NewReadingSession::default()).await.unwrap();

        let failing = ReadingSessionService::new(
            Arc::new(FailingStore::new(store.clone(), "update_book_session")),
            Arc::new(store.clone()),
        );
        let result = failing.end(&session, Some(100), None).await;

        assert!(matches!(result, Err(ReadingError::Infrastructure(_))));
        let stored = store.reading_session(&session.id).await.unwrap();
        assert!(stored.is_active());
        assert_eq!(stored.pages_read, 0);
        assert!(!store.book_session(&book.id).await.unwrap().is_finished);
    }

    #[tokio::test]
    async fn failed_delete_keeps_session_and_finished_book() {
        let store = InMemoryStore::new();
        let (books, readings) = services(&store);
        let book = book(&books, 100).await;
        let session = readings.start(&book, NewReadingSession::default()).await.unwrap();
        let ended = readings.end(&session, Some(100), None).await.unwrap();

        let failing = ReadingSessionService::new(
            Arc::new(FailingStore::new(store.clone(), "update_book_session")),
            Arc::new(store.clone()),
        );
        let result = failing.delete(&ended).await;

        assert!(matches!(result, Err(ReadingError::Infrastructure(_))));
        assert!(store.reading_session(&session.id).await.is_some());
        assert!(store.book_session(&book.id).await.unwrap().is_finished);
    }

    #[test]
    fn stats_for_ten_minute_session() {
        let t0 = Timestamp::from_unix_secs(1_700_000_000).unwrap();
        let mut session = ReadingSession::start(BookSessionId::new(), NewReadingSession::default(), t0);
        session.end(t0.plus_secs(600), Some(30), None).unwrap();
        let service = ReadingSessionService::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
        );

        assert_eq!(service.calculate_duration(&session), Duration::seconds(600));
        let stats = service.get_session_stats(&session);
        assert_eq!(stats.pages_per_minute, 3.0);
        assert!(!stats.is_active);
    }
}
