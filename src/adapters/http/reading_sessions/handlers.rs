//! HTTP handlers for reading session endpoints.
//!
//! Every handler resolves the session through an ownership-checked query
//! first, so sessions under another user's books answer 404.

use axum::body::Bytes;
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::reading::{
    GetBookSessionQuery, GetReadingSessionQuery, ListReadingSessionsQuery,
};
use crate::domain::foundation::{ReadingSessionId, UserId};
use crate::domain::reading::{ReadingError, ReadingSession};

use super::dto::{
    optional_body, EndReadingSessionRequest, ListReadingSessionsParams, ReadingSessionResponse,
    SessionStatsResponse, StartReadingSessionRequest, UpdateReadingSessionRequest,
};

async fn owned_session(
    state: &AppState,
    reading_session_id: ReadingSessionId,
    user_id: UserId,
) -> Result<ReadingSession, ReadingError> {
    state
        .get_reading_session_handler()
        .handle(GetReadingSessionQuery {
            reading_session_id,
            user_id,
        })
        .await
}

/// GET /api/reading-sessions
pub async fn list_reading_sessions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListReadingSessionsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state
        .list_reading_sessions_handler()
        .handle(ListReadingSessionsQuery {
            user_id: user.id,
            book_session_id: params.book_session,
        })
        .await?;

    let body: Vec<ReadingSessionResponse> =
        sessions.into_iter().map(ReadingSessionResponse::from).collect();
    Ok(Json(body))
}

/// POST /api/reading-sessions
pub async fn start_reading_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<StartReadingSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state
        .get_book_session_handler()
        .handle(GetBookSessionQuery {
            book_session_id: request.book_session,
            user_id: user.id,
        })
        .await?;

    let session = state
        .reading_sessions
        .start(&book, request.fields.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ReadingSessionResponse::from(session))))
}

/// GET /api/reading-sessions/:id
pub async fn get_reading_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ReadingSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    let session = owned_session(&state, id, user.id).await?;
    Ok(Json(ReadingSessionResponse::from(session)))
}

/// PATCH /api/reading-sessions/:id
pub async fn update_reading_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ReadingSessionId>,
    Json(request): Json<UpdateReadingSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = owned_session(&state, id, user.id).await?;
    let updated = state
        .reading_sessions
        .update(&session, request.into())
        .await?;

    Ok(Json(ReadingSessionResponse::from(updated)))
}

/// DELETE /api/reading-sessions/:id
pub async fn delete_reading_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ReadingSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    let session = owned_session(&state, id, user.id).await?;
    state.reading_sessions.delete(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/reading-sessions/:id/end
///
/// The body is optional; an empty request ends the session as recorded.
pub async fn end_reading_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ReadingSessionId>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: EndReadingSessionRequest = optional_body(&body)?;
    let session = owned_session(&state, id, user.id).await?;

    let ended = state
        .reading_sessions
        .end(&session, request.pages_read, request.notes)
        .await?;

    Ok(Json(ReadingSessionResponse::from(ended)))
}

/// GET /api/reading-sessions/:id/statistics
pub async fn reading_session_statistics(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ReadingSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    let session = owned_session(&state, id, user.id).await?;
    let stats = state.reading_sessions.get_session_stats(&session);
    Ok(Json(SessionStatsResponse::from(stats)))
}
