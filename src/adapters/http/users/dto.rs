//! Request and response bodies for account and profile endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::user::{AuthenticateUserResult, CurrentUserView};
use crate::domain::user::{NewProfile, Profile, ProfileChanges, User};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProfileRequest {
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl From<CreateProfileRequest> for NewProfile {
    fn from(request: CreateProfileRequest) -> Self {
        NewProfile {
            bio: request.bio,
            city: request.city,
            profile_picture: request.profile_picture,
            website: request.website,
        }
    }
}

/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub city: Option<String>,
    pub profile_picture: Option<String>,
    pub website: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileChanges {
            bio: request.bio,
            city: request.city,
            profile_picture: request.profile_picture,
            website: request.website,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A user as returned after registration; the password hash never leaves.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub expires_in: i64,
}

impl From<AuthenticateUserResult> for LoginResponse {
    fn from(result: AuthenticateUserResult) -> Self {
        Self {
            token: result.token.token,
            user_id: result.user_id.to_string(),
            expires_in: result.token.expires_in_secs,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub total_books: u64,
    pub finished_books: u64,
    pub created_at: String,
}

impl From<CurrentUserView> for CurrentUserResponse {
    fn from(view: CurrentUserView) -> Self {
        Self {
            id: view.id.to_string(),
            name: view.name,
            email: view.email,
            total_books: view.total_books,
            finished_books: view.finished_books,
            created_at: view.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub user_id: String,
    pub bio: String,
    pub city: String,
    pub profile_picture: Option<String>,
    pub website: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            user_id: profile.user_id.to_string(),
            bio: profile.bio,
            city: profile.city,
            profile_picture: profile.profile_picture,
            website: profile.website,
            created_at: profile.created_at.to_rfc3339(),
            updated_at: profile.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::user::PasswordHash;
    use serde_json::json;

    #[test]
    fn create_profile_request_fills_defaults() {
        let request: CreateProfileRequest = serde_json::from_value(json!({ "city": "Porto" })).unwrap();
        let fields = NewProfile::from(request);
        assert_eq!(fields.city, "Porto");
        assert_eq!(fields.bio, "");
        assert!(fields.website.is_none());
    }

    #[test]
    fn user_response_omits_password_hash() {
        let user = User::register(
            "Ada",
            "ada@example.com",
            PasswordHash::new("v1$salt$digest"),
            Timestamp::now(),
        )
        .unwrap();

        let value = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(value["email"], "ada@example.com");
        assert!(value.get("password_hash").is_none());
        assert!(!value.to_string().contains("digest"));
    }

    #[test]
    fn profile_response_carries_owner() {
        let owner = UserId::new();
        let profile = Profile::create(owner, NewProfile::default(), Timestamp::now()).unwrap();
        let value = serde_json::to_value(ProfileResponse::from(profile)).unwrap();
        assert_eq!(value["user_id"], owner.to_string());
    }
}
