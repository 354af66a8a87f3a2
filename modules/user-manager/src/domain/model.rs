use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_UNIT_LEN: usize = 25;
pub const MAX_TEAM_LEN: usize = 25;
pub const MAX_PHONE_LEN: usize = 20;

/// A user together with its linked profile, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub profile: Option<UserProfile>,
}

impl User {
    pub fn from_parts(record: UserRecord, profile: Option<UserProfile>) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            profile,
        }
    }
}

/// A `users` row as stored: the profile is a nullable foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub profile_id: Option<i32>,
}

/// A persisted user profile. `created_at` is set on insert and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i32,
    pub unit: String,
    pub team: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Incoming user data for create and update. Fields are optional so that
/// missing values surface as validation errors instead of deserialization
/// failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile: Option<NewUserProfile>,
}

/// Incoming profile data, either embedded in a user payload or standalone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUserProfile {
    pub unit: Option<String>,
    pub team: Option<String>,
    pub phone_number: Option<String>,
}

impl NewUser {
    /// Check required/length constraints. Field names in errors match the
    /// wire representation.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_within("firstName", self.first_name.as_deref(), MAX_NAME_LEN)?;
        require_within("lastName", self.last_name.as_deref(), MAX_NAME_LEN)?;
        if let Some(profile) = &self.profile {
            profile.validate_at("userProfiles.")?;
        }
        Ok(())
    }
}

impl NewUserProfile {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.validate_at("")
    }

    fn validate_at(&self, prefix: &str) -> Result<(), DomainError> {
        require_within(format!("{prefix}unit"), self.unit.as_deref(), MAX_UNIT_LEN)?;
        require_within(format!("{prefix}team"), self.team.as_deref(), MAX_TEAM_LEN)?;
        require_within(
            format!("{prefix}phoneNumber"),
            self.phone_number.as_deref(),
            MAX_PHONE_LEN,
        )?;
        Ok(())
    }
}

fn require_within(
    field: impl Into<String>,
    value: Option<&str>,
    max_len: usize,
) -> Result<(), DomainError> {
    let field = field.into();
    let Some(value) = value else {
        return Err(DomainError::validation(field, "is required"));
    };
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "is required"));
    }
    if value.chars().count() > max_len {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max_len} characters"),
        ));
    }
    Ok(())
}
