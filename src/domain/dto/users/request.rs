use serde::{Deserialize, Serialize};
use validator::Validate;

/// 프로필 생성 및 전체 수정(PUT) 요청
///
/// ```json
/// {
///   "user_id": "anna.kovacs",
///   "first_name": "Anna",
///   "last_name": "Kovács",
///   "email": "anna@example.com"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserProfileRequest {
    #[validate(length(min = 1, max = 150, message = "사용자 식별자는 1-150자 사이여야 합니다"))]
    pub user_id: String,

    #[validate(length(min = 1, max = 30, message = "이름은 1-30자 사이여야 합니다"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 30, message = "성은 1-30자 사이여야 합니다"))]
    pub last_name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UserProfileRequest {
        UserProfileRequest {
            user_id: "anna.kovacs".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Kovács".to_string(),
            email: "anna@example.com".to_string(),
        }
    }

    #[test]
    fn test_valid_profile_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_invalid_email_and_long_name() {
        let mut bad = request();
        bad.email = "not-an-email".to_string();
        bad.first_name = "x".repeat(31);

        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("first_name"));
    }
}
