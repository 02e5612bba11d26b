//! HTTP adapter for book sessions.
//!
//! - `GET/POST /api/book-sessions` - List the caller's books, create one
//! - `GET/PATCH/DELETE /api/book-sessions/:id` - Detail, update, delete
//! - `GET /api/book-sessions/:id/statistics` - Reading statistics
//! - `POST /api/book-sessions/:id/start-reading` - Start a reading session

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::book_session_routes;
