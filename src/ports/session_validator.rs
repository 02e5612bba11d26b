//! Token ports: validating bearer tokens and issuing them at login.
//!
//! HTTP middleware uses [`SessionValidator`] to turn a bearer token into an
//! [`AuthenticatedUser`]; the login handler uses [`TokenIssuer`] to mint one.
//!
//! # Contract
//!
//! Validators must check the signature, issuer and expiry and return
//! `AuthError::TokenExpired` for expired tokens, `AuthError::InvalidToken`
//! for everything else that fails.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// A freshly minted access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in_secs: i64,
}

pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError>;
}
