//! HTTP handlers for book session endpoints.

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::reading_sessions::dto::{
    optional_body, ReadingSessionResponse, StartReadingRequest,
};
use crate::adapters::http::state::AppState;
use crate::application::handlers::reading::GetBookSessionQuery;
use crate::domain::foundation::{BookSessionId, UserId};
use crate::domain::reading::{BookSession, ReadingError};

use super::dto::{
    BookSessionResponse, CreateBookSessionRequest, ReadingStatisticsResponse,
    UpdateBookSessionRequest,
};

async fn owned_book(
    state: &AppState,
    book_session_id: BookSessionId,
    user_id: UserId,
) -> Result<BookSession, ReadingError> {
    state
        .get_book_session_handler()
        .handle(GetBookSessionQuery {
            book_session_id,
            user_id,
        })
        .await
}

async fn with_progress(state: &AppState, book: BookSession) -> Result<BookSessionResponse, ReadingError> {
    let progress = state.book_sessions.calculate_progress(&book).await?;
    Ok(BookSessionResponse::new(book, progress))
}

/// GET /api/book-sessions
pub async fn list_book_sessions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let views = state.list_book_sessions_handler().handle(&user.id).await?;
    let body: Vec<BookSessionResponse> = views.into_iter().map(BookSessionResponse::from).collect();
    Ok(Json(body))
}

/// POST /api/book-sessions
pub async fn create_book_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateBookSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.book_sessions.create(&user.id, request.into()).await?;
    let body = with_progress(&state, book).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/book-sessions/:id
pub async fn get_book_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BookSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    let book = owned_book(&state, id, user.id).await?;
    Ok(Json(with_progress(&state, book).await?))
}

/// PATCH /api/book-sessions/:id
pub async fn update_book_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BookSessionId>,
    Json(request): Json<UpdateBookSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let book = owned_book(&state, id, user.id).await?;
    let updated = state.book_sessions.update(&book, request.into()).await?;
    Ok(Json(with_progress(&state, updated).await?))
}

/// DELETE /api/book-sessions/:id
pub async fn delete_book_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BookSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    let book = owned_book(&state, id, user.id).await?;
    state.book_sessions.delete(&book).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/book-sessions/:id/statistics
pub async fn book_session_statistics(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BookSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    let book = owned_book(&state, id, user.id).await?;
    let stats = state.book_sessions.get_reading_statistics(&book).await?;
    Ok(Json(ReadingStatisticsResponse::from(stats)))
}

/// POST /api/book-sessions/:id/start-reading
pub async fn start_reading(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BookSessionId>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: StartReadingRequest = optional_body(&body)?;
    let book = owned_book(&state, id, user.id).await?;

    let session = state.reading_sessions.start(&book, request.into()).await?;
    Ok((StatusCode::CREATED, Json(ReadingSessionResponse::from(session))))
}
