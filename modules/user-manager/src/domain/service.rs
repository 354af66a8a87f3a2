use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{NewUser, NewUserProfile, User, UserProfile};
use crate::domain::repo::{ProfilesRepository, UsersRepository};

/// Users service. Reconciles a user with its attached profile on every
/// mutation: profile writes always happen before the user write, and each
/// mutating operation runs inside a single transaction so the two-table
/// write cannot be observed half-applied.
pub struct UserService<U, P> {
    db: DatabaseConnection,
    users: Arc<U>,
    profiles: Arc<P>,
}

impl<U: UsersRepository, P: ProfilesRepository> UserService<U, P> {
    pub fn new(db: DatabaseConnection, users: Arc<U>, profiles: Arc<P>) -> Self {
        Self {
            db,
            users,
            profiles,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        debug!("listing users");

        let records = self.users.find_all(&self.db).await?;
        let mut profiles: HashMap<i32, UserProfile> = self
            .profiles
            .find_all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(records
            .into_iter()
            .map(|record| {
                let profile = record.profile_id.and_then(|pid| profiles.remove(&pid));
                User::from_parts(record, profile)
            })
            .collect())
    }

    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        input.validate()?;
        info!("creating user");

        let txn = self.db.begin().await?;

        // The profile row must exist before the user row references it.
        let profile = match &input.profile {
            Some(new_profile) => Some(self.insert_profile(&txn, new_profile).await?),
            None => None,
        };

        let record = self
            .users
            .insert(
                &txn,
                input.first_name.as_deref().unwrap_or_default(),
                input.last_name.as_deref().unwrap_or_default(),
                profile.as_ref().map(|p| p.id),
            )
            .await?;

        txn.commit().await?;

        info!(user_id = record.id, "user created");
        Ok(User::from_parts(record, profile))
    }

    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn update_user(&self, id: i32, input: NewUser) -> Result<User, DomainError> {
        input.validate()?;
        info!("updating user");

        let txn = self.db.begin().await?;

        let Some(mut record) = self.users.find_by_id(&txn, id).await? else {
            return Err(DomainError::not_found("User", id));
        };

        record.first_name = input.first_name.clone().unwrap_or_default();
        record.last_name = input.last_name.clone().unwrap_or_default();

        let profile = match (&input.profile, record.profile_id) {
            // Merge into the attached profile in place: its identifier and
            // creation timestamp survive the update.
            (Some(incoming), Some(profile_id)) => {
                let Some(mut existing) = self.profiles.find_by_id(&txn, profile_id).await? else {
                    return Err(DomainError::database(format!(
                        "user {id} references missing profile {profile_id}"
                    )));
                };
                existing.unit = incoming.unit.clone().unwrap_or_default();
                existing.team = incoming.team.clone().unwrap_or_default();
                existing.phone_number = incoming.phone_number.clone().unwrap_or_default();
                Some(self.profiles.update(&txn, existing).await?)
            }
            // No profile attached yet: create one and link it.
            (Some(incoming), None) => {
                let created = self.insert_profile(&txn, incoming).await?;
                record.profile_id = Some(created.id);
                Some(created)
            }
            // No profile payload: the existing link is left untouched.
            (None, Some(profile_id)) => self.profiles.find_by_id(&txn, profile_id).await?,
            (None, None) => None,
        };

        let record = self.users.update(&txn, record).await?;

        txn.commit().await?;

        info!("user updated");
        Ok(User::from_parts(record, profile))
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: i32) -> Result<(), DomainError> {
        info!("deleting user");

        let txn = self.db.begin().await?;

        let Some(record) = self.users.find_by_id(&txn, id).await? else {
            return Err(DomainError::not_found("User", id));
        };

        // The user row goes first so the profile row is unreferenced by the
        // time it is removed.
        self.users.delete(&txn, id).await?;
        if let Some(profile_id) = record.profile_id {
            self.profiles.delete(&txn, profile_id).await?;
        }

        txn.commit().await?;

        info!("user deleted");
        Ok(())
    }

    async fn insert_profile<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        new_profile: &NewUserProfile,
    ) -> Result<UserProfile, DomainError> {
        self.profiles
            .insert(
                conn,
                new_profile.unit.as_deref().unwrap_or_default(),
                new_profile.team.as_deref().unwrap_or_default(),
                new_profile.phone_number.as_deref().unwrap_or_default(),
            )
            .await
    }
}

/// Standalone profiles service. Profiles can be managed independently of
/// any user; the store's foreign key is the only guard against removing a
/// profile a user still references.
pub struct ProfileService<P> {
    db: DatabaseConnection,
    profiles: Arc<P>,
}

impl<P: ProfilesRepository> ProfileService<P> {
    pub fn new(db: DatabaseConnection, profiles: Arc<P>) -> Self {
        Self { db, profiles }
    }

    #[instrument(skip(self))]
    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, DomainError> {
        debug!("listing profiles");
        self.profiles.find_all(&self.db).await
    }

    #[instrument(skip(self), fields(profile_id = %id))]
    pub async fn get_profile(&self, id: i32) -> Result<UserProfile, DomainError> {
        debug!("getting profile");

        let found = self.profiles.find_by_id(&self.db, id).await?;
        found.ok_or_else(|| DomainError::not_found("Profile", id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_profile(&self, input: NewUserProfile) -> Result<UserProfile, DomainError> {
        input.validate()?;
        info!("creating profile");

        let created = self
            .profiles
            .insert(
                &self.db,
                input.unit.as_deref().unwrap_or_default(),
                input.team.as_deref().unwrap_or_default(),
                input.phone_number.as_deref().unwrap_or_default(),
            )
            .await?;

        info!(profile_id = created.id, "profile created");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(profile_id = %id))]
    pub async fn update_profile(
        &self,
        id: i32,
        input: NewUserProfile,
    ) -> Result<UserProfile, DomainError> {
        input.validate()?;
        info!("updating profile");

        let Some(mut existing) = self.profiles.find_by_id(&self.db, id).await? else {
            return Err(DomainError::not_found("Profile", id));
        };

        existing.unit = input.unit.clone().unwrap_or_default();
        existing.team = input.team.clone().unwrap_or_default();
        existing.phone_number = input.phone_number.clone().unwrap_or_default();

        let updated = self.profiles.update(&self.db, existing).await?;

        info!("profile updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(profile_id = %id))]
    pub async fn delete_profile(&self, id: i32) -> Result<(), DomainError> {
        info!("deleting profile");

        let deleted = self.profiles.delete(&self.db, id).await?;
        if !deleted {
            return Err(DomainError::not_found("Profile", id));
        }

        info!("profile deleted");
        Ok(())
    }
}
