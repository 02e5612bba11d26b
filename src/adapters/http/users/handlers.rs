//! HTTP handlers for account and profile endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::user::{
    AuthenticateUserCommand, CreateProfileCommand, DeleteProfileCommand, GetProfileQuery,
    RegisterUserCommand, UpdateProfileCommand,
};
use crate::domain::foundation::ProfileId;

use super::dto::{
    CreateProfileRequest, CurrentUserResponse, LoginRequest, LoginResponse, ProfileResponse,
    RegisterRequest, UpdateProfileRequest, UserResponse,
};

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .register_user_handler()
        .handle(RegisterUserCommand {
            name: request.name,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .authenticate_user_handler()
        .handle(AuthenticateUserCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(LoginResponse::from(result)))
}

/// GET /api/users/me
pub async fn get_me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.get_current_user_handler().handle(&user.id).await?;
    Ok(Json(CurrentUserResponse::from(view)))
}

/// DELETE /api/users/me
pub async fn delete_me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    state.delete_user_handler().handle(&user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/users/profile
pub async fn create_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .create_profile_handler()
        .handle(CreateProfileCommand {
            user_id: user.id,
            fields: request.into(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}

/// GET /api/users/profile/:id
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(profile_id): Path<ProfileId>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .get_profile_handler()
        .handle(GetProfileQuery {
            profile_id,
            user_id: user.id,
        })
        .await?;

    Ok(Json(ProfileResponse::from(profile)))
}

/// PATCH /api/users/profile/:id
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(profile_id): Path<ProfileId>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .update_profile_handler()
        .handle(UpdateProfileCommand {
            profile_id,
            user_id: user.id,
            changes: request.into(),
        })
        .await?;

    Ok(Json(ProfileResponse::from(profile)))
}

/// DELETE /api/users/profile/:id
pub async fn delete_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(profile_id): Path<ProfileId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_profile_handler()
        .handle(DeleteProfileCommand {
            profile_id,
            user_id: user.id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
