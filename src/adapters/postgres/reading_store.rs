//! PostgreSQL implementation of ReadingStore.
//!
//! Each unit of work owns one database transaction. `lock_*` methods use
//! `SELECT ... FOR UPDATE`; the partial unique index
//! `reading_sessions_one_active_idx` backs the one-active-session rule.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::foundation::{BookSessionId, DomainError, ErrorCode, ReadingSessionId};
use crate::domain::reading::{BookSession, ReadingSession};
use crate::ports::{ReadingStore, ReadingUnitOfWork};

use super::reading_reader::{
    pages_to_db, row_to_book_session, row_to_reading_session, BOOK_SESSION_COLUMNS,
    READING_SESSION_COLUMNS,
};
use super::{database_error, map_unique_violation};

const ONE_ACTIVE_INDEX: &str = "reading_sessions_one_active_idx";

#[derive(Clone)]
pub struct PostgresReadingStore {
    pool: PgPool,
}

impl PostgresReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PostgresReadingStore {
    async fn begin(&self) -> Result<Box<dyn ReadingUnitOfWork>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to begin transaction", e))?;
        Ok(Box::new(PostgresUnitOfWork { tx }))
    }
}

struct PostgresUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ReadingUnitOfWork for PostgresUnitOfWork {
    async fn lock_book_session(
        &mut self,
        id: &BookSessionId,
    ) -> Result<Option<BookSession>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM book_sessions WHERE id = $1 FOR UPDATE",
            BOOK_SESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| database_error("Failed to lock book session", e))?;

        row.map(row_to_book_session).transpose()
    }

    async fn insert_book_session(&mut self, book: &BookSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO book_sessions (
                id, owner_id, title, description, author, genre,
                page_number, is_finished, cover_image, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(book.id.as_uuid())
        .bind(book.owner_id.as_uuid())
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.page_number)
        .bind(book.is_finished)
        .bind(&book.cover_image)
        .bind(book.created_at.as_datetime())
        .bind(book.updated_at.as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| database_error("Failed to insert book session", e))?;

        Ok(())
    }

    async fn update_book_session(&mut self, book: &BookSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE book_sessions SET
                title = $2,
                description = $3,
                author = $4,
                genre = $5,
                page_number = $6,
                is_finished = $7,
                cover_image = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(book.id.as_uuid())
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.page_number)
        .bind(book.is_finished)
        .bind(&book.cover_image)
        .bind(book.updated_at.as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| database_error("Failed to update book session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BookSessionNotFound,
                format!("Book session not found: {}", book.id),
            ));
        }

        Ok(())
    }

    async fn delete_book_session(&mut self, id: &BookSessionId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM book_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| database_error("Failed to delete book session", e))?;

        Ok(())
    }

    async fn lock_reading_session(
        &mut self,
        id: &ReadingSessionId,
    ) -> Result<Option<ReadingSession>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM reading_sessions WHERE id = $1 FOR UPDATE",
            READING_SESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| database_error("Failed to lock reading session", e))?;

        row.map(row_to_reading_session).transpose()
    }

    async fn reading_sessions_of(
        &mut self,
        book_id: &BookSessionId,
    ) -> Result<Vec<ReadingSession>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM reading_sessions WHERE book_session_id = $1 \
             ORDER BY start_time, created_at",
            READING_SESSION_COLUMNS
        ))
        .bind(book_id.as_uuid())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| database_error("Failed to fetch reading sessions", e))?;

        rows.into_iter().map(row_to_reading_session).collect()
    }

    async fn insert_reading_session(&mut self, session: &ReadingSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reading_sessions (
                id, book_session_id, start_time, end_time, pages_read,
                notes, is_finished, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.book_session_id.as_uuid())
        .bind(session.start_time.as_datetime())
        .bind(session.end_time.as_ref().map(|t| *t.as_datetime()))
        .bind(pages_to_db(session.pages_read)?)
        .bind(&session.notes)
        .bind(session.is_finished)
        .bind(session.created_at.as_datetime())
        .bind(session.updated_at.as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                ONE_ACTIVE_INDEX,
                ErrorCode::ActiveSessionExists,
                "Failed to insert reading session",
            )
        })?;

        Ok(())
    }

    async fn update_reading_session(&mut self, session: &ReadingSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE reading_sessions SET
                end_time = $2,
                pages_read = $3,
                notes = $4,
                is_finished = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.end_time.as_ref().map(|t| *t.as_datetime()))
        .bind(pages_to_db(session.pages_read)?)
        .bind(&session.notes)
        .bind(session.is_finished)
        .bind(session.updated_at.as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| database_error("Failed to update reading session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ReadingSessionNotFound,
                format!("Reading session not found: {}", session.id),
            ));
        }

        Ok(())
    }

    async fn delete_reading_session(&mut self, id: &ReadingSessionId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM reading_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| database_error("Failed to delete reading session", e))?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| database_error("Failed to commit transaction", e))
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| database_error("Failed to roll back transaction", e))
    }
}
