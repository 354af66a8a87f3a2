use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::error::DomainError;
use crate::domain::model::{UserProfile, UserRecord};

/// Persistence operations for the `users` table.
///
/// Methods are generic over the connection so the service layer decides the
/// unit of work: a plain connection for reads, a transaction for the
/// two-table writes.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// All users in id (insertion) order.
    async fn find_all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<UserRecord>, DomainError>;

    async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<UserRecord>, DomainError>;

    /// Insert a new row; the store generates the identifier.
    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        first_name: &str,
        last_name: &str,
        profile_id: Option<i32>,
    ) -> Result<UserRecord, DomainError>;

    /// Full-row update of an existing user.
    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: UserRecord,
    ) -> Result<UserRecord, DomainError>;

    /// Delete by id, reporting whether a row was removed.
    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<bool, DomainError>;
}

/// Persistence operations for the `user_profiles` table.
#[async_trait]
pub trait ProfilesRepository: Send + Sync {
    /// All profiles in id (insertion) order.
    async fn find_all<C: ConnectionTrait>(&self, conn: &C)
    -> Result<Vec<UserProfile>, DomainError>;

    async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<UserProfile>, DomainError>;

    /// Insert a new row; the store generates the identifier and the
    /// creation timestamp is set to now.
    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        unit: &str,
        team: &str,
        phone_number: &str,
    ) -> Result<UserProfile, DomainError>;

    /// Full-row update of an existing profile, `created_at` included.
    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        profile: UserProfile,
    ) -> Result<UserProfile, DomainError>;

    /// Delete by id, reporting whether a row was removed.
    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<bool, DomainError>;
}
