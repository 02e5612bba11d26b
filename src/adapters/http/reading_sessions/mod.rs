//! HTTP adapter for reading sessions.
//!
//! - `GET /api/reading-sessions[?book_session=<id>]` - Caller's sessions
//! - `POST /api/reading-sessions` - Start a session on a book
//! - `GET/PATCH/DELETE /api/reading-sessions/:id` - Detail, update, delete
//! - `POST /api/reading-sessions/:id/end` - End an active session
//! - `GET /api/reading-sessions/:id/statistics` - Duration and pace

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::reading_session_routes;
