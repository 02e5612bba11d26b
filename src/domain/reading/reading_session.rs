//! ReadingSession entity: one timed reading interval against a book.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookSessionId, ReadingSessionId, Timestamp};

use super::ReadingError;

/// One reading interval.
///
/// Active while `end_time` is `None`. At most one active session may exist
/// per book session; that rule spans entities and is enforced by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingSession {
    pub id: ReadingSessionId,
    pub book_session_id: BookSessionId,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub pages_read: u32,
    pub notes: String,
    pub is_finished: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Optional initial values when starting a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewReadingSession {
    pub pages_read: Option<u32>,
    pub notes: Option<String>,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingSessionChanges {
    pub pages_read: Option<u32>,
    pub notes: Option<String>,
    pub is_finished: Option<bool>,
}

impl ReadingSession {
    /// Opens a new active session starting at `now`.
    pub fn start(book_session_id: BookSessionId, fields: NewReadingSession, now: Timestamp) -> Self {
        Self {
            id: ReadingSessionId::new(),
            book_session_id,
            start_time: now,
            end_time: None,
            pages_read: fields.pages_read.unwrap_or(0),
            notes: fields.notes.unwrap_or_default(),
            is_finished: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Closes the session at `now`, overwriting pages/notes only when given.
    ///
    /// # Errors
    ///
    /// `ReadingError::Validation` if the session already ended.
    pub fn end(
        &mut self,
        now: Timestamp,
        pages_read: Option<u32>,
        notes: Option<String>,
    ) -> Result<(), ReadingError> {
        if !self.is_active() {
            return Err(ReadingError::already_ended());
        }

        self.end_time = Some(now);
        if let Some(pages_read) = pages_read {
            self.pages_read = pages_read;
        }
        if let Some(notes) = notes {
            self.notes = notes;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// `ReadingError::Validation` if the session ended and `pages_read` is supplied.
    pub fn apply(&mut self, changes: ReadingSessionChanges, now: Timestamp) -> Result<(), ReadingError> {
        if !self.is_active() && changes.pages_read.is_some() {
            return Err(ReadingError::pages_read_locked());
        }

        if let Some(pages_read) = changes.pages_read {
            self.pages_read = pages_read;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
        if let Some(is_finished) = changes.is_finished {
            self.is_finished = is_finished;
        }
        self.updated_at = now;
        Ok(())
    }
}
