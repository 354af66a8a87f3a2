use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{NewUser, NewUserProfile, User, UserProfile};

/// A user as it appears on the wire. The linked profile is embedded under
/// `userProfiles`, keeping the historical field name.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_profiles: Option<ProfileDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub id: i32,
    pub unit: String,
    pub team: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Incoming user payload for create and update. Fields are deserialized
/// leniently; required/length constraints are enforced by the domain so
/// violations come back as field-level problems.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_profiles: Option<ProfileRequest>,
}

/// Incoming profile payload, embedded in a user or standalone.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            user_profiles: user.profile.map(Into::into),
        }
    }
}

impl From<UserProfile> for ProfileDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            unit: profile.unit,
            team: profile.team,
            phone_number: profile.phone_number,
            created_at: profile.created_at,
        }
    }
}

impl From<UserRequest> for NewUser {
    fn from(req: UserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            profile: req.user_profiles.map(Into::into),
        }
    }
}

impl From<ProfileRequest> for NewUserProfile {
    fn from(req: ProfileRequest) -> Self {
        Self {
            unit: req.unit,
            team: req.team,
            phone_number: req.phone_number,
        }
    }
}
