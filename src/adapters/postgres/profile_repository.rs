//! PostgreSQL implementation of ProfileRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, Timestamp, UserId};
use crate::domain::user::Profile;
use crate::ports::ProfileRepository;

use super::{database_error, map_unique_violation};

const PROFILE_COLUMNS: &str =
    "id, user_id, bio, city, profile_picture, website, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, id: &Uuid) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM profiles WHERE {} = $1",
            PROFILE_COLUMNS, column
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch profile", e))?;

        row.map(row_to_profile).transpose()
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn create(&self, profile: &Profile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, user_id, bio, city, profile_picture, website, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(profile.user_id.as_uuid())
        .bind(&profile.bio)
        .bind(&profile.city)
        .bind(&profile.profile_picture)
        .bind(&profile.website)
        .bind(profile.created_at.as_datetime())
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                "profiles_user_id_key",
                ErrorCode::ProfileExists,
                "Failed to insert profile",
            )
        })?;

        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                bio = $2,
                city = $3,
                profile_picture = $4,
                website = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(&profile.bio)
        .bind(&profile.city)
        .bind(&profile.profile_picture)
        .bind(&profile.website)
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("Failed to update profile", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found: {}", profile.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError> {
        self.find_one("id", id.as_uuid()).await
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        self.find_one("user_id", user_id.as_uuid()).await
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete profile", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found: {}", id),
            ));
        }

        Ok(())
    }
}

fn row_to_profile(row: PgRow) -> Result<Profile, DomainError> {
    let map = |e: sqlx::Error| database_error("Failed to decode profile", e);

    Ok(Profile {
        id: ProfileId::from_uuid(row.try_get::<Uuid, _>("id").map_err(map)?),
        user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id").map_err(map)?),
        bio: row.try_get("bio").map_err(map)?,
        city: row.try_get("city").map_err(map)?,
        profile_picture: row.try_get("profile_picture").map_err(map)?,
        website: row.try_get("website").map_err(map)?,
        created_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("created_at").map_err(map)?,
        ),
        updated_at: Timestamp::from_datetime(
            row.try_get::<DateTime<Utc>, _>("updated_at").map_err(map)?,
        ),
    })
}
