//! Axum router for reading session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    delete_reading_session, end_reading_session, get_reading_session, list_reading_sessions,
    reading_session_statistics, start_reading_session, update_reading_session,
};

/// Routes mounted under `/api/reading-sessions`.
pub fn reading_session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reading_sessions).post(start_reading_session))
        .route(
            "/:id",
            get(get_reading_session)
                .patch(update_reading_session)
                .delete(delete_reading_session),
        )
        .route("/:id/end", post(end_reading_session))
        .route("/:id/statistics", get(reading_session_statistics))
}
