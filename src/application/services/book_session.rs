//! BookSessionService - business rules over a book session and its reading sessions.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::foundation::{Percentage, Timestamp, UserId};
use crate::domain::reading::statistics::{self, ReadingStatistics};
use crate::domain::reading::{
    ensure_positive_page_number, BookSession, BookSessionChanges, NewBookSession, ReadingError,
};
use crate::ports::{ReadingReader, ReadingStore, ReadingUnitOfWork};

use super::complete;
use super::reading_session::end_within;

pub struct BookSessionService {
    store: Arc<dyn ReadingStore>,
    reader: Arc<dyn ReadingReader>,
}

impl BookSessionService {
    pub fn new(store: Arc<dyn ReadingStore>, reader: Arc<dyn ReadingReader>) -> Self {
        Self { store, reader }
    }

    /// Creates a book session owned by `owner`.
    ///
    /// # Errors
    ///
    /// `ReadingError::Validation` if `page_number <= 0`.
    pub async fn create(
        &self,
        owner: &UserId,
        fields: NewBookSession,
    ) -> Result<BookSession, ReadingError> {
        let book = BookSession::create(*owner, fields, Timestamp::now())?;

        let mut uow = self.store.begin().await?;
        let result = uow.insert_book_session(&book).await.map_err(ReadingError::from);
        complete(uow, result).await?;

        tracing::info!(book_session_id = %book.id, owner_id = %owner, "book session created");
        Ok(book)
    }

    /// Applies `changes` to `book`, auto-completing it when progress reaches 100%.
    ///
    /// # Errors
    ///
    /// - `Validation` if the new page count is not positive or is below the
    ///   pages already recorded
    /// - `BookSessionNotFound` if the book was deleted concurrently
    pub async fn update(
        &self,
        book: &BookSession,
        changes: BookSessionChanges,
    ) -> Result<BookSession, ReadingError> {
        let mut uow = self.store.begin().await?;
        let result = update_within(uow.as_mut(), book, changes, Timestamp::now()).await;
        let updated = complete(uow, result).await?;

        tracing::info!(
            book_session_id = %updated.id,
            is_finished = updated.is_finished,
            "book session updated"
        );
        Ok(updated)
    }

    /// Ends every active reading session of `book`, then deletes it.
    pub async fn delete(&self, book: &BookSession) -> Result<(), ReadingError> {
        let mut uow = self.store.begin().await?;
        let result = delete_within(uow.as_mut(), book, Timestamp::now()).await;
        let ended = complete(uow, result).await?;

        tracing::info!(
            book_session_id = %book.id,
            ended_sessions = ended,
            "book session deleted"
        );
        Ok(())
    }

    pub async fn calculate_progress(&self, book: &BookSession) -> Result<Percentage, ReadingError> {
        let sessions = self.reader.list_reading_sessions(&book.id).await?;
        Ok(statistics::calculate_progress(book, &sessions))
    }

    /// Sum of durations over ended reading sessions.
    pub async fn get_total_reading_time(&self, book: &BookSession) -> Result<Duration, ReadingError> {
        let sessions = self.reader.list_reading_sessions(&book.id).await?;
        Ok(statistics::total_reading_time(&sessions))
    }

    pub async fn get_reading_statistics(
        &self,
        book: &BookSession,
    ) -> Result<ReadingStatistics, ReadingError> {
        let sessions = self.reader.list_reading_sessions(&book.id).await?;
        Ok(statistics::reading_statistics(book, &sessions))
    }
}

async fn update_within(
    uow: &mut dyn ReadingUnitOfWork,
    book: &BookSession,
    changes: BookSessionChanges,
    now: Timestamp,
) -> Result<BookSession, ReadingError> {
    let mut current = uow
        .lock_book_session(&book.id)
        .await?
        .ok_or(ReadingError::BookSessionNotFound(book.id))?;
    let sessions = uow.reading_sessions_of(&book.id).await?;

    if let Some(page_number) = changes.page_number {
        ensure_positive_page_number(page_number)?;
        let total = statistics::total_pages_read(&sessions);
        if i64::from(page_number) < total as i64 {
            return Err(ReadingError::page_number_below_progress(total));
        }
    }

    current.apply(changes, now);
    if statistics::calculate_progress(&current, &sessions).is_complete() {
        current.mark_finished(now);
    }

    uow.update_book_session(&current).await?;
    Ok(current)
}

/// Returns how many active sessions were ended.
async fn delete_within(
    uow: &mut dyn ReadingUnitOfWork,
    book: &BookSession,
    now: Timestamp,
) -> Result<usize, ReadingError> {
    let mut current = uow
        .lock_book_session(&book.id)
        .await?
        .ok_or(ReadingError::BookSessionNotFound(book.id))?;

    let mut ended = 0;
    for mut session in uow.reading_sessions_of(&book.id).await? {
        if session.is_active() {
            end_within(uow, &mut current, &mut session, None, None, now).await?;
            ended += 1;
        }
    }

    uow.delete_book_session(&book.id).await?;
    Ok(ended)
}
