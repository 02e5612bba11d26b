//! Authentication middleware and extractor for axum.
//!
//! - `auth_middleware` validates a `Bearer` token through the
//!   `SessionValidator` port and stores the caller in request extensions.
//! - `RequireAuth` pulls the caller back out, rejecting with 401 when absent.
//!
//! ```text
//! Request → auth_middleware → extensions: AuthenticatedUser
//!                                      ↓
//!                              Handler(RequireAuth(user))
//! ```
//!
//! Requests without an `Authorization` header pass through untouched so
//! public routes (register, login, health) share the same stack.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser, ErrorCode};
use crate::ports::SessionValidator;

pub type AuthState = Arc<dyn SessionValidator>;

pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let Some(header) = header else {
        return next.run(request).await;
    };

    let Some(token) = header.strip_prefix("Bearer ") else {
        return unauthorized("Expected a Bearer token");
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AuthError::TokenExpired) => unauthorized("Token expired"),
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            unauthorized("Invalid token")
        }
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new(ErrorCode::Unauthorized.to_string(), message)),
    )
        .into_response()
}

/// Extractor for handlers that need a caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid bearer token accompanied the request.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => unauthorized("Authentication required"),
        }
    }
}
