//! ListBookSessionsHandler - The caller's book sessions with their progress.

use std::sync::Arc;

use crate::domain::foundation::{Percentage, UserId};
use crate::domain::reading::statistics::calculate_progress;
use crate::domain::reading::{BookSession, ReadingError};
use crate::ports::ReadingReader;

/// A book session together with its derived progress.
#[derive(Debug, Clone, PartialEq)]
pub struct BookSessionView {
    pub book: BookSession,
    pub progress: Percentage,
}

pub struct ListBookSessionsHandler {
    reader: Arc<dyn ReadingReader>,
}

impl ListBookSessionsHandler {
    pub fn new(reader: Arc<dyn ReadingReader>) -> Self {
        Self { reader }
    }

    /// Most recently updated first.
    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<BookSessionView>, ReadingError> {
        let books = self.reader.list_book_sessions(user_id).await?;

        let mut views = Vec::with_capacity(books.len());
        for book in books {
            let sessions = self.reader.list_reading_sessions(&book.id).await?;
            let progress = calculate_progress(&book, &sessions);
            views.push(BookSessionView { book, progress });
        }
        Ok(views)
    }
}
