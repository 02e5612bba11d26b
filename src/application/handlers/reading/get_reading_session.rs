//! GetReadingSessionHandler - Query handler for one reading session of an owned book.

use std::sync::Arc;

use crate::domain::foundation::{ReadingSessionId, UserId};
use crate::domain::reading::{ReadingError, ReadingSession};
use crate::ports::ReadingReader;

#[derive(Debug, Clone)]
pub struct GetReadingSessionQuery {
    pub reading_session_id: ReadingSessionId,
    pub user_id: UserId,
}

pub struct GetReadingSessionHandler {
    reader: Arc<dyn ReadingReader>,
}

impl GetReadingSessionHandler {
    pub fn new(reader: Arc<dyn ReadingReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetReadingSessionQuery,
    ) -> Result<ReadingSession, ReadingError> {
        let not_found = || ReadingError::ReadingSessionNotFound(query.reading_session_id);

        let session = self
            .reader
            .get_reading_session(&query.reading_session_id)
            .await?
            .ok_or_else(not_found)?;

        // Ownership lives on the parent book.
        match self.reader.get_book_session(&session.book_session_id).await? {
            Some(book) if book.is_owned_by(&query.user_id) => Ok(session),
            _ => Err(not_found()),
        }
    }
}
