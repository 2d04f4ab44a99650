//! # 문자열 유틸리티
//!
//! 요청 입력 정리와 ObjectId 파싱에 쓰이는 공통 함수들입니다.

use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use crate::core::errors::AppError;

/// 필수 문자열 필드를 검증하고 앞뒤 공백을 제거합니다.
///
/// 빈 문자열이나 공백만 있는 경우 `ValidationError`를 반환합니다.
///
/// ```rust,ignore
/// assert_eq!(validate_required_string("  Gulyás  ", "title")?, "Gulyás");
/// assert!(validate_required_string("   ", "title").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// 빈 문자열과 공백 문자열은 `None`이 됩니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 24자리 16진수 문자열을 `ObjectId`로 파싱합니다.
///
/// 형식이 잘못된 경우 필드명을 담은 `ValidationError`를 반환합니다.
pub fn parse_object_id(value: &str, field_name: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value.trim())
        .map_err(|_| AppError::ValidationError(format!("유효하지 않은 {} 형식입니다: {}", field_name, value)))
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용하며,
/// null, 빈 문자열, 공백 문자열을 모두 `None`으로 정리합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("Pörkölt", "title").unwrap(), "Pörkölt");
        assert_eq!(validate_required_string("  Lecsó  ", "title").unwrap(), "Lecsó");

        assert!(validate_required_string("", "title").is_err());
        assert!(validate_required_string("\t\n", "title").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  csípős  ".to_string())), Some("csípős".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "recipe_id").unwrap(), id);

        match parse_object_id("not-an-id", "recipe_id") {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("recipe_id")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            comments: Option<String>,
        }

        let parsed: Payload = serde_json::from_str(r#"{"comments": "  apróra vágva  "}"#).unwrap();
        assert_eq!(parsed.comments, Some("apróra vágva".to_string()));

        let parsed: Payload = serde_json::from_str(r#"{"comments": "   "}"#).unwrap();
        assert_eq!(parsed.comments, None);

        let parsed: Payload = serde_json::from_str(r#"{"comments": null}"#).unwrap();
        assert_eq!(parsed.comments, None);

        let parsed: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.comments, None);
    }
}
