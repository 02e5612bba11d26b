//! Request and response bodies for reading session endpoints.
//!
//! Durations are sent as fractional seconds.

use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::adapters::http::error::ApiError;

use crate::domain::foundation::BookSessionId;
use crate::domain::reading::statistics::calculate_duration;
use crate::domain::reading::{NewReadingSession, ReadingSession, ReadingSessionChanges, SessionStats};

/// Whole duration in seconds, millisecond precision.
pub fn seconds(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 1000.0
}

/// Decodes a body that may be left out entirely.
///
/// An empty (or all-whitespace) body yields `T::default()`. Anything else
/// must be valid JSON for `T`, with or without a `Content-Type` header.
pub fn optional_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct ListReadingSessionsParams {
    pub book_session: Option<BookSessionId>,
}

/// Body of `POST /api/book-sessions/:id/start-reading`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartReadingRequest {
    pub pages_read: Option<u32>,
    pub notes: Option<String>,
}

impl From<StartReadingRequest> for NewReadingSession {
    fn from(request: StartReadingRequest) -> Self {
        NewReadingSession {
            pages_read: request.pages_read,
            notes: request.notes,
        }
    }
}

/// Body of `POST /api/reading-sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct StartReadingSessionRequest {
    pub book_session: BookSessionId,
    #[serde(flatten)]
    pub fields: StartReadingRequest,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReadingSessionRequest {
    pub pages_read: Option<u32>,
    pub notes: Option<String>,
    pub is_finished: Option<bool>,
}

impl From<UpdateReadingSessionRequest> for ReadingSessionChanges {
    fn from(request: UpdateReadingSessionRequest) -> Self {
        ReadingSessionChanges {
            pages_read: request.pages_read,
            notes: request.notes,
            is_finished: request.is_finished,
        }
    }
}

/// Both fields keep their recorded values when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndReadingSessionRequest {
    pub pages_read: Option<u32>,
    pub notes: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ReadingSessionResponse {
    pub id: String,
    pub book_session_id: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub pages_read: u32,
    pub notes: String,
    pub is_finished: bool,
    pub is_active: bool,
    /// Seconds
    pub duration: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReadingSession> for ReadingSessionResponse {
    fn from(session: ReadingSession) -> Self {
        Self {
            id: session.id.to_string(),
            book_session_id: session.book_session_id.to_string(),
            start_time: session.start_time.to_rfc3339(),
            end_time: session.end_time.map(|t| t.to_rfc3339()),
            is_active: session.is_active(),
            duration: seconds(calculate_duration(&session)),
            pages_read: session.pages_read,
            notes: session.notes,
            is_finished: session.is_finished,
            created_at: session.created_at.to_rfc3339(),
            updated_at: session.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatsResponse {
    /// Seconds
    pub duration: f64,
    pub pages_read: u32,
    pub pages_per_minute: f64,
    pub is_active: bool,
}

impl From<SessionStats> for SessionStatsResponse {
    fn from(stats: SessionStats) -> Self {
        Self {
            duration: seconds(stats.duration),
            pages_read: stats.pages_read,
            pages_per_minute: stats.pages_per_minute,
            is_active: stats.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seconds_keeps_millisecond_precision() {
        assert_eq!(seconds(Duration::seconds(600)), 600.0);
        assert_eq!(seconds(Duration::milliseconds(1500)), 1.5);
        assert_eq!(seconds(Duration::zero()), 0.0);
    }

    #[test]
    fn start_request_flattens_optional_fields() {
        let id = BookSessionId::new();
        let request: StartReadingSessionRequest =
            serde_json::from_value(json!({ "book_session": id, "pages_read": 4 })).unwrap();
        assert_eq!(request.book_session, id);
        assert_eq!(request.fields.pages_read, Some(4));
        assert!(request.fields.notes.is_none());
    }

    #[test]
    fn negative_pages_are_rejected_at_the_boundary() {
        let result: Result<UpdateReadingSessionRequest, _> =
            serde_json::from_value(json!({ "pages_read": -3 }));
        assert!(result.is_err());
    }

    #[test]
    fn empty_body_is_the_default_request() {
        let request: EndReadingSessionRequest = optional_body(b"").unwrap();
        assert_eq!(request.pages_read, None);

        let request: EndReadingSessionRequest = optional_body(b" \n").unwrap();
        assert_eq!(request.notes, None);
    }

    #[test]
    fn present_body_must_decode() {
        let request: EndReadingSessionRequest =
            optional_body(br#"{"pages_read": 30}"#).unwrap();
        assert_eq!(request.pages_read, Some(30));

        let wrong_type: Result<EndReadingSessionRequest, _> =
            optional_body(br#"{"pages_read": "thirty"}"#);
        assert!(matches!(wrong_type, Err(ApiError::InvalidBody(_))));

        let negative: Result<StartReadingRequest, _> = optional_body(br#"{"pages_read": -1}"#);
        assert!(matches!(negative, Err(ApiError::InvalidBody(_))));

        let malformed: Result<StartReadingRequest, _> = optional_body(b"{pages_read");
        assert!(matches!(malformed, Err(ApiError::InvalidBody(_))));
    }
}
