//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresReadingStore` - Transactional unit of work for book/reading sessions
//! - `PostgresReadingReader` - Committed-state reading queries
//! - `PostgresUserRepository` - Users
//! - `PostgresProfileRepository` - Profiles

mod profile_repository;
mod reading_reader;
mod reading_store;
mod user_repository;

pub use profile_repository::PostgresProfileRepository;
pub use reading_reader::PostgresReadingReader;
pub use reading_store::PostgresReadingStore;
pub use user_repository::PostgresUserRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wraps a sqlx error as a `DatabaseError` with context.
fn database_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Maps a violation of `constraint` to `code`, anything else to `DatabaseError`.
fn map_unique_violation(
    e: sqlx::Error,
    constraint: &str,
    code: ErrorCode,
    context: &str,
) -> DomainError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() && db.constraint() == Some(constraint) {
            return DomainError::new(code, db.message().to_string());
        }
    }
    database_error(context, e)
}

fn column_out_of_range(column: &str, value: i64) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Column {} out of range: {}", column, value),
    )
}
