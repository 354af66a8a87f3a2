use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait, QueryOrder};

use crate::domain::error::DomainError;
use crate::domain::model::{UserProfile, UserRecord};
use crate::domain::repo::{ProfilesRepository, UsersRepository};
use crate::infra::storage::entity::{user_profiles, users};

/// [`UsersRepository`] over the `users` table.
pub struct SeaOrmUsersRepository;

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn find_all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<UserRecord>, DomainError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(conn)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<UserRecord>, DomainError> {
        let model = users::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(Into::into))
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        first_name: &str,
        last_name: &str,
        profile_id: Option<i32>,
    ) -> Result<UserRecord, DomainError> {
        let active = users::ActiveModel {
            id: ActiveValue::NotSet,
            first_name: ActiveValue::Set(first_name.to_owned()),
            last_name: ActiveValue::Set(last_name.to_owned()),
            profile_id: ActiveValue::Set(profile_id),
        };
        let model = active.insert(conn).await?;
        Ok(model.into())
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: UserRecord,
    ) -> Result<UserRecord, DomainError> {
        let active = users::ActiveModel {
            id: ActiveValue::Unchanged(record.id),
            first_name: ActiveValue::Set(record.first_name),
            last_name: ActiveValue::Set(record.last_name),
            profile_id: ActiveValue::Set(record.profile_id),
        };
        let model = active.update(conn).await?;
        Ok(model.into())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<bool, DomainError> {
        let result = users::Entity::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }
}

/// [`ProfilesRepository`] over the `user_profiles` table.
pub struct SeaOrmProfilesRepository;

#[async_trait]
impl ProfilesRepository for SeaOrmProfilesRepository {
    async fn find_all<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Vec<UserProfile>, DomainError> {
        let models = user_profiles::Entity::find()
            .order_by_asc(user_profiles::Column::Id)
            .all(conn)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<UserProfile>, DomainError> {
        let model = user_profiles::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(Into::into))
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        unit: &str,
        team: &str,
        phone_number: &str,
    ) -> Result<UserProfile, DomainError> {
        let active = user_profiles::ActiveModel {
            id: ActiveValue::NotSet,
            unit: ActiveValue::Set(unit.to_owned()),
            team: ActiveValue::Set(team.to_owned()),
            phone_number: ActiveValue::Set(phone_number.to_owned()),
            created_at: ActiveValue::Set(Utc::now()),
        };
        let model = active.insert(conn).await?;
        Ok(model.into())
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        profile: UserProfile,
    ) -> Result<UserProfile, DomainError> {
        let active = user_profiles::ActiveModel {
            id: ActiveValue::Unchanged(profile.id),
            unit: ActiveValue::Set(profile.unit),
            team: ActiveValue::Set(profile.team),
            phone_number: ActiveValue::Set(profile.phone_number),
            created_at: ActiveValue::Set(profile.created_at),
        };
        let model = active.update(conn).await?;
        Ok(model.into())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<bool, DomainError> {
        let result = user_profiles::Entity::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }
}
