//! User Rating Entity
//!
//! 프로필 하나가 레시피 하나에 남긴 0-5 정수 평점입니다.
//! (user_id, recipe_id) 쌍마다 최대 한 건만 존재합니다.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, AppResult};

/// 허용되는 최소 평점
pub const MIN_RATING: i32 = 0;
/// 허용되는 최대 평점
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRating {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 평점을 남긴 `UserProfile`의 ID
    pub user_id: ObjectId,
    pub recipe_id: ObjectId,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRating {
    /// 범위를 검증한 뒤 새 평점을 생성합니다.
    pub fn new(user_id: ObjectId, recipe_id: ObjectId, rating: i32) -> AppResult<Self> {
        let rating = check_rating(rating)?;
        let now = Utc::now();

        Ok(Self {
            id: None,
            user_id,
            recipe_id,
            rating,
            created_at: now,
            updated_at: now,
        })
    }

    /// 평점 값을 바꿉니다. 범위를 벗어나면 값은 그대로 유지됩니다.
    pub fn change_rating(&mut self, rating: i32) -> AppResult<()> {
        self.rating = check_rating(rating)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// 평점이 `MIN_RATING..=MAX_RATING` 범위인지 확인합니다.
pub fn check_rating(rating: i32) -> AppResult<i32> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::ValidationError(format!(
            "평점은 {}에서 {} 사이여야 합니다 (입력값: {})",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(rating)
}

/// 평점 목록의 평균을 소수 둘째 자리로 반올림합니다.
///
/// 몫을 `f64`로 구한 뒤 그 이진 값을 기준으로 둘째 자리에서 반올림하며,
/// 정확히 중간값이면 짝수 쪽으로 보냅니다. `1/40`은 `0.025`보다 조금 큰 `f64`이므로 `0.03`입니다.
/// 평점이 없으면 정확히 `0.0`입니다.
///
/// ```rust,ignore
/// assert_eq!(rounded_average([3, 4, 5]), 4.0);
/// assert_eq!(rounded_average([1, 1, 2]), 1.33);
/// assert_eq!(rounded_average([]), 0.0);
/// ```
pub fn rounded_average<I>(ratings: I) -> f64
where
    I: IntoIterator<Item = i32>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), rating| (sum + i64::from(rating), count + 1));

    if count == 0 {
        return 0.0;
    }

    let average = sum as f64 / count as f64;
    format!("{:.2}", average).parse().unwrap_or(average)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_average_of_empty_set_is_zero() {
        assert_eq!(rounded_average(Vec::<i32>::new()), 0.0);
    }

    #[test]
    fn test_rounded_average_known_values() {
        assert_eq!(rounded_average([3, 4, 5]), 4.0);
        assert_eq!(rounded_average([1, 2]), 1.5);
        assert_eq!(rounded_average([1, 1, 2]), 1.33);
        assert_eq!(rounded_average([2, 2, 3]), 2.33);
        assert_eq!(rounded_average([1, 2, 2]), 1.67);
        assert_eq!(rounded_average([0]), 0.0);
        assert_eq!(rounded_average([5, 5, 5, 5]), 5.0);
    }

    #[test]
    fn test_rounded_average_ties_go_to_even() {
        // 1/8 = 0.125 → 0.12, 3/8 = 0.375 → 0.38
        assert_eq!(rounded_average([1, 0, 0, 0, 0, 0, 0, 0]), 0.12);
        assert_eq!(rounded_average([1, 1, 1, 0, 0, 0, 0, 0]), 0.38);
    }

    #[test]
    fn test_rounded_average_follows_binary_quotient() {
        let mut one_in_forty = vec![1];
        one_in_forty.extend([0; 39]);
        assert_eq!(rounded_average(one_in_forty), 0.03);

        // 1/200 = 0.005은 0.005보다 조금 큰 f64
        let mut one_in_two_hundred = vec![1];
        one_in_two_hundred.extend([0; 199]);
        assert_eq!(rounded_average(one_in_two_hundred), 0.01);
    }

    #[test]
    fn test_check_rating_bounds() {
        assert!(check_rating(0).is_ok());
        assert!(check_rating(5).is_ok());
        assert!(matches!(check_rating(-1), Err(AppError::ValidationError(_))));
        assert!(matches!(check_rating(6), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_change_rating_keeps_value_on_error() {
        let mut rating = UserRating::new(ObjectId::new(), ObjectId::new(), 3).unwrap();

        assert!(rating.change_rating(9).is_err());
        assert_eq!(rating.rating, 3);

        rating.change_rating(1).unwrap();
        assert_eq!(rating.rating, 1);
    }
}
