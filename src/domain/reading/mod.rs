//! Reading domain module.
//!
//! Book sessions (a book being tracked) and their reading sessions (timed
//! reading intervals), plus the pure functions that derive progress and pace
//! from them.

mod book_session;
mod errors;
mod reading_session;
pub mod statistics;

pub(crate) use book_session::ensure_positive_page_number;
pub use book_session::{BookSession, BookSessionChanges, NewBookSession};
pub use errors::ReadingError;
pub use reading_session::{NewReadingSession, ReadingSession, ReadingSessionChanges};
pub use statistics::{ReadingStatistics, SessionStats};
