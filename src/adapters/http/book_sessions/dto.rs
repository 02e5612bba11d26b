//! Request and response bodies for book session endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::reading_sessions::dto::seconds;
use crate::application::handlers::reading::BookSessionView;
use crate::domain::foundation::Percentage;
use crate::domain::reading::{BookSession, BookSessionChanges, NewBookSession, ReadingStatistics};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookSessionRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    pub page_number: i32,
    #[serde(default)]
    pub is_finished: bool,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl From<CreateBookSessionRequest> for NewBookSession {
    fn from(request: CreateBookSessionRequest) -> Self {
        NewBookSession {
            title: request.title,
            description: request.description,
            author: request.author,
            genre: request.genre,
            page_number: request.page_number,
            is_finished: request.is_finished,
            cover_image: request.cover_image,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookSessionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub page_number: Option<i32>,
    pub is_finished: Option<bool>,
    pub cover_image: Option<String>,
}

impl From<UpdateBookSessionRequest> for BookSessionChanges {
    fn from(request: UpdateBookSessionRequest) -> Self {
        BookSessionChanges {
            title: request.title,
            description: request.description,
            author: request.author,
            genre: request.genre,
            page_number: request.page_number,
            is_finished: request.is_finished,
            cover_image: request.cover_image,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct BookSessionResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub genre: String,
    pub page_number: i32,
    pub is_finished: bool,
    pub cover_image: Option<String>,
    /// 0..=100
    pub progress: u8,
    pub created_at: String,
    pub updated_at: String,
}

impl BookSessionResponse {
    pub fn new(book: BookSession, progress: Percentage) -> Self {
        Self {
            id: book.id.to_string(),
            owner_id: book.owner_id.to_string(),
            title: book.title,
            description: book.description,
            author: book.author,
            genre: book.genre,
            page_number: book.page_number,
            is_finished: book.is_finished,
            cover_image: book.cover_image,
            progress: progress.value(),
            created_at: book.created_at.to_rfc3339(),
            updated_at: book.updated_at.to_rfc3339(),
        }
    }
}

impl From<BookSessionView> for BookSessionResponse {
    fn from(view: BookSessionView) -> Self {
        Self::new(view.book, view.progress)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadingStatisticsResponse {
    pub progress: u8,
    /// Seconds
    pub total_reading_time: f64,
    pub sessions_count: usize,
    /// Seconds
    pub average_session_length: f64,
    pub pages_per_session: f64,
}

impl From<ReadingStatistics> for ReadingStatisticsResponse {
    fn from(stats: ReadingStatistics) -> Self {
        Self {
            progress: stats.progress.value(),
            total_reading_time: seconds(stats.total_reading_time),
            sessions_count: stats.sessions_count,
            average_session_length: seconds(stats.average_session_length),
            pages_per_session: stats.pages_per_session,
        }
    }
}
