//! ListReadingSessionsHandler - The caller's reading sessions, optionally for one book.

use std::sync::Arc;

use crate::domain::foundation::{BookSessionId, UserId};
use crate::domain::reading::{ReadingError, ReadingSession};
use crate::ports::ReadingReader;

use super::{GetBookSessionHandler, GetBookSessionQuery};

#[derive(Debug, Clone)]
pub struct ListReadingSessionsQuery {
    pub user_id: UserId,
    pub book_session_id: Option<BookSessionId>,
}

pub struct ListReadingSessionsHandler {
    reader: Arc<dyn ReadingReader>,
}

impl ListReadingSessionsHandler {
    pub fn new(reader: Arc<dyn ReadingReader>) -> Self {
        Self { reader }
    }

    /// Filtered by book: oldest first. Unfiltered: newest first across all books.
    ///
    /// # Errors
    ///
    /// `BookSessionNotFound` if the filter names a book the caller does not own.
    pub async fn handle(
        &self,
        query: ListReadingSessionsQuery,
    ) -> Result<Vec<ReadingSession>, ReadingError> {
        match query.book_session_id {
            Some(book_session_id) => {
                let book = GetBookSessionHandler::new(self.reader.clone())
                    .handle(GetBookSessionQuery {
                        book_session_id,
                        user_id: query.user_id,
                    })
                    .await?;
                Ok(self.reader.list_reading_sessions(&book.id).await?)
            }
            None => Ok(self
                .reader
                .list_reading_sessions_for_owner(&query.user_id)
                .await?),
        }
    }
}
