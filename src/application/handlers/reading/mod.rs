//! Reading query handlers.
//!
//! Ownership-checked lookups over book and reading sessions. Mutations go
//! through `application::services`.

mod get_book_session;
mod get_reading_session;
mod list_book_sessions;
mod list_reading_sessions;

pub use get_book_session::{GetBookSessionHandler, GetBookSessionQuery};
pub use get_reading_session::{GetReadingSessionHandler, GetReadingSessionQuery};
pub use list_book_sessions::{BookSessionView, ListBookSessionsHandler};
pub use list_reading_sessions::{ListReadingSessionsHandler, ListReadingSessionsQuery};
