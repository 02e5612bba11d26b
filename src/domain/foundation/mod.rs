//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the reading tracker domain.

mod auth;
mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BookSessionId, ProfileId, ReadingSessionId, UserId};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
