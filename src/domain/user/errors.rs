//! User and profile error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Email is already registered")]
    EmailTaken,

    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Profile already exists for this user")]
    ProfileExists,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl UserError {
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::Validation(_) => ErrorCode::ValidationFailed,
            UserError::EmailTaken => ErrorCode::EmailTaken,
            UserError::InvalidCredentials => ErrorCode::Unauthorized,
            UserError::UserNotFound => ErrorCode::UserNotFound,
            UserError::ProfileExists => ErrorCode::ProfileExists,
            UserError::ProfileNotFound => ErrorCode::ProfileNotFound,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EmailTaken => UserError::EmailTaken,
            ErrorCode::ProfileExists => UserError::ProfileExists,
            ErrorCode::UserNotFound => UserError::UserNotFound,
            ErrorCode::ProfileNotFound => UserError::ProfileNotFound,
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_codes_map_to_conflicts() {
        let err: UserError = DomainError::new(ErrorCode::EmailTaken, "duplicate key").into();
        assert_eq!(err, UserError::EmailTaken);

        let err: UserError = DomainError::new(ErrorCode::ProfileExists, "duplicate key").into();
        assert_eq!(err, UserError::ProfileExists);
    }

    #[test]
    fn other_codes_are_infrastructure() {
        let err: UserError = DomainError::database("pool timed out").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
