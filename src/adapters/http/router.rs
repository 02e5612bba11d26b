//! Top-level API router.
//!
//! Composes the per-area routers under `/api`, installs the bearer-token
//! middleware and the tower-http layers (request ids, tracing, timeout, CORS).

use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::book_sessions::book_session_routes;
use super::middleware::{auth_middleware, AuthState};
use super::reading_sessions::reading_session_routes;
use super::state::AppState;
use super::users::user_routes;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the full application router for `state`.
pub fn api_router(state: AppState, server: &ServerConfig) -> Router {
    let auth_state: AuthState = state.validator.clone();
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let api = Router::new()
        .nest("/users", user_routes())
        .nest("/book-sessions", book_session_routes())
        .nest("/reading-sessions", reading_session_routes())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

