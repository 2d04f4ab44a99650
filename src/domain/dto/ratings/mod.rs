//! `/api/v1/ratings` 요청/응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::ratings::UserRating;

/// 평점 등록 요청. 같은 사용자의 같은 레시피 평점이 있으면 교체됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RatingRequest {
    /// `UserProfile` ID (24자리 16진수)
    #[validate(length(equal = 24, message = "user_id는 24자리 ObjectId여야 합니다"))]
    pub user_id: String,

    #[validate(length(equal = 24, message = "recipe_id는 24자리 ObjectId여야 합니다"))]
    pub recipe_id: String,

    #[validate(range(min = 0, max = 5, message = "평점은 0에서 5 사이여야 합니다"))]
    pub rating: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRatingRequest {
    #[validate(range(min = 0, max = 5, message = "평점은 0에서 5 사이여야 합니다"))]
    pub rating: i32,
}

/// 목록 조회 필터 (`?recipe_id=...&user_id=...`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingQuery {
    pub recipe_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingResponse {
    pub id: String,
    pub user_id: String,
    pub recipe_id: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRating> for RatingResponse {
    fn from(rating: UserRating) -> Self {
        Self {
            id: rating.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: rating.user_id.to_hex(),
            recipe_id: rating.recipe_id.to_hex(),
            rating: rating.rating,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

/// 평점 변경 결과와 재계산된 레시피 평균
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingChangeResponse {
    pub rating: RatingResponse,
    pub average_rating: f64,
}
