//! User entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Encoded credential produced by a `PasswordHasher` adapter.
///
/// Opaque to the domain. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// A registered reader.
///
/// # Invariants
///
/// - `name` is non-empty
/// - `email` is lower-cased, trimmed and unique across users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Builds a new user from registration input.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for a blank name
    /// - `InvalidFormat` for an email without a local part or domain
    pub fn register(
        name: &str,
        email: &str,
        password_hash: PasswordHash,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            id: UserId::new(),
            name: name.to_string(),
            email: normalize_email(email)?,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Trims and lower-cases an email, rejecting obviously malformed input.
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(ValidationError::invalid_format("email", "expected name@domain")),
    }
}

/// Rejects credentials that cannot be accepted at registration.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::empty_field("password"));
    }
    Ok(())
}
