use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        let full_name = profile.full_name();
        let UserProfile {
            id,
            user_id,
            first_name,
            last_name,
            email,
            created_at,
            updated_at,
        } = profile;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id,
            first_name,
            last_name,
            full_name,
            email,
            created_at,
            updated_at,
        }
    }
}
