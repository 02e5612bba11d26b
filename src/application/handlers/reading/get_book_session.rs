//! GetBookSessionHandler - Query handler for one owned book session.

use std::sync::Arc;

use crate::domain::foundation::{BookSessionId, UserId};
use crate::domain::reading::{BookSession, ReadingError};
use crate::ports::ReadingReader;

#[derive(Debug, Clone)]
pub struct GetBookSessionQuery {
    pub book_session_id: BookSessionId,
    pub user_id: UserId,
}

pub struct GetBookSessionHandler {
    reader: Arc<dyn ReadingReader>,
}

impl GetBookSessionHandler {
    pub fn new(reader: Arc<dyn ReadingReader>) -> Self {
        Self { reader }
    }

    /// Book sessions owned by someone else are reported as not found.
    pub async fn handle(&self, query: GetBookSessionQuery) -> Result<BookSession, ReadingError> {
        match self.reader.get_book_session(&query.book_session_id).await? {
            Some(book) if book.is_owned_by(&query.user_id) => Ok(book),
            _ => Err(ReadingError::BookSessionNotFound(query.book_session_id)),
        }
    }
}
