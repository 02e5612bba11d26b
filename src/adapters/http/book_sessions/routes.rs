//! Axum router for book session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    book_session_statistics, create_book_session, delete_book_session, get_book_session,
    list_book_sessions, start_reading, update_book_session,
};

/// Routes mounted under `/api/book-sessions`.
pub fn book_session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_book_sessions).post(create_book_session))
        .route(
            "/:id",
            get(get_book_session)
                .patch(update_book_session)
                .delete(delete_book_session),
        )
        .route("/:id/statistics", get(book_session_statistics))
        .route("/:id/start-reading", post(start_reading))
}
