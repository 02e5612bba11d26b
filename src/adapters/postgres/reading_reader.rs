//! PostgreSQL implementation of ReadingReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    BookSessionId, DomainError, ReadingSessionId, Timestamp, UserId,
};
use crate::domain::reading::{BookSession, ReadingSession};
use crate::ports::ReadingReader;

use super::{column_out_of_range, database_error};

pub(super) const BOOK_SESSION_COLUMNS: &str = "id, owner_id, title, description, author, genre, \
     page_number, is_finished, cover_image, created_at, updated_at";

pub(super) const READING_SESSION_COLUMNS: &str = "id, book_session_id, start_time, end_time, \
     pages_read, notes, is_finished, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresReadingReader {
    pool: PgPool,
}

impl PostgresReadingReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingReader for PostgresReadingReader {
    async fn get_book_session(&self, id: &BookSessionId) -> Result<Option<BookSession>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM book_sessions WHERE id = $1",
            BOOK_SESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch book session", e))?;

        row.map(row_to_book_session).transpose()
    }

    async fn list_book_sessions(&self, owner: &UserId) -> Result<Vec<BookSession>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM book_sessions WHERE owner_id = $1 ORDER BY updated_at DESC",
            BOOK_SESSION_COLUMNS
        ))
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list book sessions", e))?;

        rows.into_iter().map(row_to_book_session).collect()
    }

    async fn get_reading_session(
        &self,
        id: &ReadingSessionId,
    ) -> Result<Option<ReadingSession>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM reading_sessions WHERE id = $1",
            READING_SESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch reading session", e))?;

        row.map(row_to_reading_session).transpose()
    }

    async fn list_reading_sessions(
        &self,
        book_id: &BookSessionId,
    ) -> Result<Vec<ReadingSession>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM reading_sessions WHERE book_session_id = $1 \
             ORDER BY start_time, created_at",
            READING_SESSION_COLUMNS
        ))
        .bind(book_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list reading sessions", e))?;

        rows.into_iter().map(row_to_reading_session).collect()
    }

    async fn list_reading_sessions_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ReadingSession>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.book_session_id, r.start_time, r.end_time,
                   r.pages_read, r.notes, r.is_finished, r.created_at, r.updated_at
            FROM reading_sessions r
            JOIN book_sessions b ON b.id = r.book_session_id
            WHERE b.owner_id = $1
            ORDER BY r.start_time DESC
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list reading sessions by owner", e))?;

        rows.into_iter().map(row_to_reading_session).collect()
    }

    async fn count_book_sessions(&self, owner: &UserId) -> Result<(u64, u64), DomainError> {
        let (total, finished): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE is_finished)
            FROM book_sessions
            WHERE owner_id = $1
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("Failed to count book sessions", e))?;

        Ok((total.max(0) as u64, finished.max(0) as u64))
    }
}

pub(super) fn row_to_book_session(row: PgRow) -> Result<BookSession, DomainError> {
    let map = |e: sqlx::Error| database_error("Failed to decode book session", e);

    Ok(BookSession {
        id: BookSessionId::from_uuid(row.try_get::<Uuid, _>("id").map_err(map)?),
        owner_id: UserId::from_uuid(row.try_get::<Uuid, _>("owner_id").map_err(map)?),
        title: row.try_get("title").map_err(map)?,
        description: row.try_get("description").map_err(map)?,
        author: row.try_get("author").map_err(map)?,
        genre: row.try_get("genre").map_err(map)?,
        page_number: row.try_get("page_number").map_err(map)?,
        is_finished: row.try_get("is_finished").map_err(map)?,
        cover_image: row.try_get("cover_image").map_err(map)?,
        created_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("created_at").map_err(map)?,
        ),
        updated_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("updated_at").map_err(map)?,
        ),
    })
}

pub(super) fn row_to_reading_session(row: PgRow) -> Result<ReadingSession, DomainError> {
    let map = |e: sqlx::Error| database_error("Failed to decode reading session", e);

    let pages_read: i32 = row.try_get("pages_read").map_err(map)?;
    let pages_read =
        u32::try_from(pages_read).map_err(|_| column_out_of_range("pages_read", pages_read.into()))?;

    Ok(ReadingSession {
        id: ReadingSessionId::from_uuid(row.try_get::<Uuid, _>("id").map_err(map)?),
        book_session_id: BookSessionId::from_uuid(
            row.try_get::<Uuid, _>("book_session_id").map_err(map)?,
        ),
        start_time: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("start_time").map_err(map)?,
        ),
        end_time: row
            .try_get::<Option<DateTime<Utc>>, _>("end_time")
            .map_err(map)?
            .map(Timestamp::from_datetime),
        pages_read,
        notes: row.try_get("notes").map_err(map)?,
        is_finished: row.try_get("is_finished").map_err(map)?,
        created_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("created_at").map_err(map)?,
        ),
        updated_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("updated_at").map_err(map)?,
        ),
    })
}

/// `pages_read` as stored; the column is a non-negative INTEGER.
pub(super) fn pages_to_db(pages_read: u32) -> Result<i32, DomainError> {
    i32::try_from(pages_read).map_err(|_| column_out_of_range("pages_read", pages_read.into()))
}
