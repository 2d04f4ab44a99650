//! User Profile Entity
//!
//! 외부 인증 시스템의 사용자 식별자(`user_id`)에 1:1로 연결되는 프로필입니다.

use std::fmt;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 사용자 프로필
///
/// `user_id`는 컬렉션 전체에서 유일하며 유니크 인덱스로 보장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 외부 사용자 식별자 (유니크)
    pub user_id: String,
    /// 최대 30자
    pub first_name: String,
    /// 최대 30자
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user_id: String, first_name: String, last_name: String, email: String) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            user_id,
            first_name,
            last_name,
            email,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_displays_as_user_id() {
        let profile = UserProfile::new(
            "anna.kovacs".to_string(),
            "Anna".to_string(),
            "Kovács".to_string(),
            "anna@example.com".to_string(),
        );

        assert_eq!(profile.to_string(), "anna.kovacs");
        assert_eq!(profile.full_name(), "Anna Kovács");
        assert!(profile.id.is_none());
    }
}
