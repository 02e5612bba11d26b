//! Reading-specific error types.

use thiserror::Error;

use crate::domain::foundation::{BookSessionId, DomainError, ErrorCode, ReadingSessionId};

/// Errors raised by book/reading session operations.
///
/// Business rules only ever produce [`ReadingError::Validation`]; the
/// not-found variants come from lookups performed by query handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadingError {
    /// A business rule rejected the operation.
    #[error("{0}")]
    Validation(String),

    #[error("Book session not found: {0}")]
    BookSessionNotFound(BookSessionId),

    #[error("Reading session not found: {0}")]
    ReadingSessionNotFound(ReadingSessionId),

    /// Persistence or other infrastructure failure.
    #[error("Error: {0}")]
    Infrastructure(String),
}

impl ReadingError {
    pub fn validation(message: impl Into<String>) -> Self {
        ReadingError::Validation(message.into())
    }

    pub fn non_positive_page_number() -> Self {
        Self::validation("Page number must be positive")
    }

    pub fn page_number_below_progress(total_pages_read: u64) -> Self {
        Self::validation(format!(
            "Cannot set page count below current progress ({} pages)",
            total_pages_read
        ))
    }

    pub fn active_session_exists() -> Self {
        Self::validation("There's already an active reading session for this book")
    }

    pub fn book_finished() -> Self {
        Self::validation("Cannot start session for a finished book")
    }

    pub fn already_ended() -> Self {
        Self::validation("Session is already ended")
    }

    pub fn pages_read_locked() -> Self {
        Self::validation("Cannot modify pages read for ended session")
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReadingError::Infrastructure(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ReadingError::Validation(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReadingError::Validation(_) => ErrorCode::ValidationFailed,
            ReadingError::BookSessionNotFound(_) => ErrorCode::BookSessionNotFound,
            ReadingError::ReadingSessionNotFound(_) => ErrorCode::ReadingSessionNotFound,
            ReadingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for ReadingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            // Raised by the store's uniqueness backstop when two starts race.
            ErrorCode::ActiveSessionExists => ReadingError::active_session_exists(),
            ErrorCode::ValidationFailed => ReadingError::Validation(err.message),
            _ => ReadingError::Infrastructure(err.to_string()),
        }
    }
}
