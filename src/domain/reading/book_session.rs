//! BookSession entity: one book a user is tracking.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookSessionId, Timestamp, UserId};

use super::ReadingError;

/// A book being read.
///
/// # Invariants
///
/// - `page_number > 0`
/// - `owner_id` never changes after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSession {
    pub id: BookSessionId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub genre: String,
    /// Total number of pages in the book.
    pub page_number: i32,
    pub is_finished: bool,
    /// Reference to an externally stored cover image.
    pub cover_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Caller-supplied fields for a new book session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBookSession {
    pub title: String,
    pub description: String,
    pub author: String,
    pub genre: String,
    pub page_number: i32,
    pub is_finished: bool,
    pub cover_image: Option<String>,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSessionChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub page_number: Option<i32>,
    pub is_finished: Option<bool>,
    pub cover_image: Option<String>,
}

impl BookSession {
    /// Builds a new book session for `owner_id`.
    ///
    /// # Errors
    ///
    /// `ReadingError::Validation` if `page_number <= 0`.
    pub fn create(
        owner_id: UserId,
        fields: NewBookSession,
        now: Timestamp,
    ) -> Result<Self, ReadingError> {
        ensure_positive_page_number(fields.page_number)?;

        Ok(Self {
            id: BookSessionId::new(),
            owner_id,
            title: fields.title,
            description: fields.description,
            author: fields.author,
            genre: fields.genre,
            page_number: fields.page_number,
            is_finished: fields.is_finished,
            cover_image: fields.cover_image,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies every provided change. Cross-entity rules are checked by the service.
    pub fn apply(&mut self, changes: BookSessionChanges, now: Timestamp) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        if let Some(genre) = changes.genre {
            self.genre = genre;
        }
        if let Some(page_number) = changes.page_number {
            self.page_number = page_number;
        }
        if let Some(is_finished) = changes.is_finished {
            self.is_finished = is_finished;
        }
        if let Some(cover_image) = changes.cover_image {
            self.cover_image = Some(cover_image);
        }
        self.updated_at = now;
    }

    pub fn mark_finished(&mut self, now: Timestamp) {
        self.is_finished = true;
        self.updated_at = now;
    }

    pub fn mark_unfinished(&mut self, now: Timestamp) {
        self.is_finished = false;
        self.updated_at = now;
    }

    /// Whether `owner` is the user who created this book session.
    pub fn is_owned_by(&self, owner: &UserId) -> bool {
        &self.owner_id == owner
    }
}

pub(crate) fn ensure_positive_page_number(page_number: i32) -> Result<(), ReadingError> {
    if page_number <= 0 {
        return Err(ReadingError::non_positive_page_number());
    }
    Ok(())
}
