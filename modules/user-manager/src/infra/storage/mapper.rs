//! Conversions between storage models and domain types.

use crate::domain::model::{UserProfile, UserRecord};
use crate::infra::storage::entity::{user_profiles, users};

impl From<users::Model> for UserRecord {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            profile_id: model.profile_id,
        }
    }
}

impl From<user_profiles::Model> for UserProfile {
    fn from(model: user_profiles::Model) -> Self {
        Self {
            id: model.id,
            unit: model.unit,
            team: model.team,
            phone_number: model.phone_number,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn user_model_maps_to_record() {
        let model = users::Model {
            id: 1,
            first_name: "john".to_owned(),
            last_name: "doe".to_owned(),
            profile_id: Some(2),
        };

        let record: UserRecord = model.into();
        assert_eq!(record.id, 1);
        assert_eq!(record.first_name, "john");
        assert_eq!(record.last_name, "doe");
        assert_eq!(record.profile_id, Some(2));
    }

    #[test]
    fn profile_model_maps_to_domain_profile() {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 10, 12, 5, 44).unwrap();
        let model = user_profiles::Model {
            id: 2,
            unit: "engineering".to_owned(),
            team: "backend".to_owned(),
            phone_number: "9876543211".to_owned(),
            created_at,
        };

        let profile: UserProfile = model.into();
        assert_eq!(profile.id, 2);
        assert_eq!(profile.unit, "engineering");
        assert_eq!(profile.team, "backend");
        assert_eq!(profile.phone_number, "9876543211");
        assert_eq!(profile.created_at, created_at);
    }
}
