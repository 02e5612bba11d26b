//! HTTP adapters - REST API over axum.
//!
//! Each area has its own `dto`, `handlers` and `routes`; `api_router`
//! composes them.

pub mod book_sessions;
pub mod error;
pub mod middleware;
pub mod reading_sessions;
mod router;
mod state;
pub mod users;

pub use error::{ApiError, ErrorResponse};
pub use router::api_router;
pub use state::AppState;
