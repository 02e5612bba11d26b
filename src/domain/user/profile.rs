//! Profile entity: optional personal details attached one-to-one to a user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProfileId, Timestamp, UserId, ValidationError};

const CITY_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub bio: String,
    pub city: String,
    /// Reference to an externally stored picture.
    pub profile_picture: Option<String>,
    pub website: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProfile {
    pub bio: String,
    pub city: String,
    pub profile_picture: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub bio: Option<String>,
    pub city: Option<String>,
    pub profile_picture: Option<String>,
    pub website: Option<String>,
}

impl Profile {
    pub fn create(user_id: UserId, fields: NewProfile, now: Timestamp) -> Result<Self, ValidationError> {
        validate_city(&fields.city)?;
        if let Some(website) = &fields.website {
            validate_website(website)?;
        }

        Ok(Self {
            id: ProfileId::new(),
            user_id,
            bio: fields.bio,
            city: fields.city,
            profile_picture: fields.profile_picture,
            website: fields.website,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates everything first so a rejected update leaves the profile untouched.
    pub fn apply(&mut self, changes: ProfileChanges, now: Timestamp) -> Result<(), ValidationError> {
        if let Some(city) = &changes.city {
            validate_city(city)?;
        }
        if let Some(website) = &changes.website {
            validate_website(website)?;
        }

        if let Some(bio) = changes.bio {
            self.bio = bio;
        }
        if let Some(city) = changes.city {
            self.city = city;
        }
        if let Some(picture) = changes.profile_picture {
            self.profile_picture = Some(picture);
        }
        if let Some(website) = changes.website {
            self.website = Some(website);
        }
        self.updated_at = now;
        Ok(())
    }
}

fn validate_city(city: &str) -> Result<(), ValidationError> {
    let len = city.chars().count();
    if len > CITY_MAX_LEN {
        return Err(ValidationError::out_of_range(
            "city",
            0,
            CITY_MAX_LEN as i64,
            len as i64,
        ));
    }
    Ok(())
}

fn validate_website(website: &str) -> Result<(), ValidationError> {
    let rest = website
        .strip_prefix("https://")
        .or_else(|| website.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ValidationError::invalid_format(
            "website",
            "expected an http(s) URL",
        )),
    }
}
