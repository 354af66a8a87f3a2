use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use crate::domain::error::DomainError;
use crate::domain::model::{NewUser, NewUserProfile, UserProfile, UserRecord};
use crate::domain::repo::{ProfilesRepository, UsersRepository};
use crate::domain::service::{ProfileService, UserService};

type CallLog = Arc<Mutex<Vec<String>>>;

struct MockUsersRepository {
    rows: Mutex<Vec<UserRecord>>,
    next_id: Mutex<i32>,
    calls: CallLog,
}

impl MockUsersRepository {
    fn new(rows: Vec<UserRecord>, calls: CallLog) -> Self {
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(rows),
            next_id: Mutex::new(next_id),
            calls,
        }
    }
}

#[async_trait]
impl UsersRepository for MockUsersRepository {
    async fn find_all<C: ConnectionTrait>(&self, _conn: &C) -> Result<Vec<UserRecord>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id<C: ConnectionTrait>(
        &self,
        _conn: &C,
        id: i32,
    ) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        _conn: &C,
        first_name: &str,
        last_name: &str,
        profile_id: Option<i32>,
    ) -> Result<UserRecord, DomainError> {
        self.calls.lock().unwrap().push("users.insert".to_owned());
        let mut next_id = self.next_id.lock().unwrap();
        let record = UserRecord {
            id: *next_id,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            profile_id,
        };
        *next_id += 1;
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update<C: ConnectionTrait>(
        &self,
        _conn: &C,
        record: UserRecord,
    ) -> Result<UserRecord, DomainError> {
        self.calls.lock().unwrap().push("users.update".to_owned());
        let mut rows = self.rows.lock().unwrap();
        let existing = rows
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| DomainError::database("update of missing user row"))?;
        *existing = record.clone();
        Ok(record)
    }

    async fn delete<C: ConnectionTrait>(&self, _conn: &C, id: i32) -> Result<bool, DomainError> {
        self.calls.lock().unwrap().push("users.delete".to_owned());
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}

struct MockProfilesRepository {
    rows: Mutex<Vec<UserProfile>>,
    next_id: Mutex<i32>,
    calls: CallLog,
}

impl MockProfilesRepository {
    fn new(rows: Vec<UserProfile>, calls: CallLog) -> Self {
        let next_id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(rows),
            next_id: Mutex::new(next_id),
            calls,
        }
    }
}

#[async_trait]
impl ProfilesRepository for MockProfilesRepository {
    async fn find_all<C: ConnectionTrait>(
        &self,
        _conn: &C,
    ) -> Result<Vec<UserProfile>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id<C: ConnectionTrait>(
        &self,
        _conn: &C,
        id: i32,
    ) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        _conn: &C,
        unit: &str,
        team: &str,
        phone_number: &str,
    ) -> Result<UserProfile, DomainError> {
        self.calls.lock().unwrap().push("profiles.insert".to_owned());
        let mut next_id = self.next_id.lock().unwrap();
        let profile = UserProfile {
            id: *next_id,
            unit: unit.to_owned(),
            team: team.to_owned(),
            phone_number: phone_number.to_owned(),
            created_at: Utc::now(),
        };
        *next_id += 1;
        self.rows.lock().unwrap().push(profile.clone());
        Ok(profile)
    }

    async fn update<C: ConnectionTrait>(
        &self,
        _conn: &C,
        profile: UserProfile,
    ) -> Result<UserProfile, DomainError> {
        self.calls.lock().unwrap().push("profiles.update".to_owned());
        let mut rows = self.rows.lock().unwrap();
        let existing = rows
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| DomainError::database("update of missing profile row"))?;
        *existing = profile.clone();
        Ok(profile)
    }

    async fn delete<C: ConnectionTrait>(&self, _conn: &C, id: i32) -> Result<bool, DomainError> {
        self.calls.lock().unwrap().push("profiles.delete".to_owned());
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }
}

fn seeded_profile(id: i32) -> UserProfile {
    UserProfile {
        id,
        unit: "customer value".to_owned(),
        team: "marketing".to_owned(),
        phone_number: "9876543210".to_owned(),
        created_at: seeded_timestamp(),
    }
}

fn seeded_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 10, 12, 5, 44).unwrap()
}

fn new_user_input(profile: Option<NewUserProfile>) -> NewUser {
    NewUser {
        first_name: Some("john".to_owned()),
        last_name: Some("doe".to_owned()),
        profile,
    }
}

fn new_profile_input() -> NewUserProfile {
    NewUserProfile {
        unit: Some("engineering".to_owned()),
        team: Some("backend".to_owned()),
        phone_number: Some("9876543211".to_owned()),
    }
}

async fn test_db() -> DatabaseConnection {
    Database::connect("sqlite::memory:").await.unwrap()
}

struct Fixture {
    users: UserService<MockUsersRepository, MockProfilesRepository>,
    calls: CallLog,
}

async fn fixture(user_rows: Vec<UserRecord>, profile_rows: Vec<UserProfile>) -> Fixture {
    let calls: CallLog = Arc::default();
    let users_repo = Arc::new(MockUsersRepository::new(user_rows, calls.clone()));
    let profiles_repo = Arc::new(MockProfilesRepository::new(profile_rows, calls.clone()));
    Fixture {
        users: UserService::new(test_db().await, users_repo, profiles_repo),
        calls,
    }
}

fn writes(calls: &CallLog) -> Vec<String> {
    calls.lock().unwrap().clone()
}

#[tokio::test]
async fn create_user_inserts_profile_before_user() {
    let fx = fixture(vec![], vec![]).await;

    let created = fx
        .users
        .create_user(new_user_input(Some(new_profile_input())))
        .await
        .unwrap();

    assert_eq!(created.first_name, "john");
    let profile = created.profile.expect("profile should be attached");
    assert_eq!(profile.unit, "engineering");
    assert_eq!(
        writes(&fx.calls),
        vec!["profiles.insert".to_owned(), "users.insert".to_owned()]
    );
}

#[tokio::test]
async fn create_user_without_profile_touches_only_users() {
    let fx = fixture(vec![], vec![]).await;

    let created = fx.users.create_user(new_user_input(None)).await.unwrap();

    assert!(created.profile.is_none());
    assert_eq!(writes(&fx.calls), vec!["users.insert".to_owned()]);
}

#[tokio::test]
async fn create_user_with_invalid_input_performs_no_writes() {
    let fx = fixture(vec![], vec![]).await;

    let input = NewUser {
        first_name: None,
        ..new_user_input(None)
    };
    let err = fx.users.create_user(input).await.unwrap_err();

    assert!(matches!(err, DomainError::Validation { .. }));
    assert!(writes(&fx.calls).is_empty());
}

#[tokio::test]
async fn update_user_merges_attached_profile_in_place() {
    let fx = fixture(
        vec![UserRecord {
            id: 1,
            first_name: "srivatsan".to_owned(),
            last_name: "n".to_owned(),
            profile_id: Some(7),
        }],
        vec![seeded_profile(7)],
    )
    .await;

    let updated = fx
        .users
        .update_user(
            1,
            NewUser {
                first_name: Some("srivatsan".to_owned()),
                last_name: Some("narayanan".to_owned()),
                profile: Some(NewUserProfile {
                    unit: Some("sales".to_owned()),
                    team: Some("enterprise".to_owned()),
                    phone_number: Some("9876543210".to_owned()),
                }),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.last_name, "narayanan");
    let profile = updated.profile.expect("profile should still be attached");
    assert_eq!(profile.id, 7, "profile identifier must survive the merge");
    assert_eq!(
        profile.created_at,
        seeded_timestamp(),
        "creation timestamp must survive the merge"
    );
    assert_eq!(profile.unit, "sales");
    assert_eq!(profile.team, "enterprise");

    let log = writes(&fx.calls);
    assert!(!log.contains(&"profiles.insert".to_owned()), "no new profile row");
    assert_eq!(
        log,
        vec!["profiles.update".to_owned(), "users.update".to_owned()]
    );
}

#[tokio::test]
async fn update_user_attaches_new_profile_when_none_linked() {
    let fx = fixture(
        vec![UserRecord {
            id: 1,
            first_name: "john".to_owned(),
            last_name: "doe".to_owned(),
            profile_id: None,
        }],
        vec![],
    )
    .await;

    let updated = fx
        .users
        .update_user(1, new_user_input(Some(new_profile_input())))
        .await
        .unwrap();

    let profile = updated.profile.expect("profile should be attached");
    assert_eq!(profile.unit, "engineering");
    assert_eq!(
        writes(&fx.calls),
        vec!["profiles.insert".to_owned(), "users.update".to_owned()]
    );
}

#[tokio::test]
async fn update_user_without_profile_payload_keeps_existing_link() {
    let fx = fixture(
        vec![UserRecord {
            id: 1,
            first_name: "john".to_owned(),
            last_name: "doe".to_owned(),
            profile_id: Some(7),
        }],
        vec![seeded_profile(7)],
    )
    .await;

    let updated = fx.users.update_user(1, new_user_input(None)).await.unwrap();

    let profile = updated.profile.expect("existing profile should be returned");
    assert_eq!(profile.id, 7);
    assert_eq!(profile.unit, "customer value", "profile fields untouched");
    assert_eq!(writes(&fx.calls), vec!["users.update".to_owned()]);
}

#[tokio::test]
async fn update_missing_user_fails_without_writes() {
    let fx = fixture(vec![], vec![]).await;

    let err = fx
        .users
        .update_user(42, new_user_input(Some(new_profile_input())))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(writes(&fx.calls).is_empty());
}

#[tokio::test]
async fn delete_user_cascades_to_attached_profile() {
    let fx = fixture(
        vec![UserRecord {
            id: 1,
            first_name: "john".to_owned(),
            last_name: "doe".to_owned(),
            profile_id: Some(7),
        }],
        vec![seeded_profile(7)],
    )
    .await;

    fx.users.delete_user(1).await.unwrap();

    assert_eq!(
        writes(&fx.calls),
        vec!["users.delete".to_owned(), "profiles.delete".to_owned()],
        "user row goes first, then the dependent profile"
    );
}

#[tokio::test]
async fn delete_user_without_profile_leaves_profiles_alone() {
    let fx = fixture(
        vec![UserRecord {
            id: 1,
            first_name: "john".to_owned(),
            last_name: "doe".to_owned(),
            profile_id: None,
        }],
        vec![seeded_profile(7)],
    )
    .await;

    fx.users.delete_user(1).await.unwrap();

    assert_eq!(writes(&fx.calls), vec!["users.delete".to_owned()]);
}

#[tokio::test]
async fn delete_missing_user_fails_without_writes() {
    let fx = fixture(vec![], vec![]).await;

    let err = fx.users.delete_user(42).await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(writes(&fx.calls).is_empty());
}

#[tokio::test]
async fn profile_update_preserves_identity_and_timestamp() {
    let calls: CallLog = Arc::default();
    let profiles_repo = Arc::new(MockProfilesRepository::new(
        vec![seeded_profile(7)],
        calls.clone(),
    ));
    let service = ProfileService::new(test_db().await, profiles_repo);

    let updated = service
        .update_profile(
            7,
            NewUserProfile {
                unit: Some("platform".to_owned()),
                team: Some("infra".to_owned()),
                phone_number: Some("5550001111".to_owned()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, 7);
    assert_eq!(updated.created_at, seeded_timestamp());
    assert_eq!(updated.unit, "platform");
}

#[tokio::test]
async fn profile_get_missing_fails_with_not_found() {
    let calls: CallLog = Arc::default();
    let profiles_repo = Arc::new(MockProfilesRepository::new(vec![], calls));
    let service = ProfileService::new(test_db().await, profiles_repo);

    let err = service.get_profile(42).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}
