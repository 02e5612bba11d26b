//! Axum router for account and profile endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    create_profile, delete_me, delete_profile, get_me, get_profile, login, register,
    update_profile,
};

/// Routes mounted under `/api/users`.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_me).delete(delete_me))
        .route("/profile", post(create_profile))
        .route(
            "/profile/:id",
            get(get_profile).patch(update_profile).delete(delete_profile),
        )
}
