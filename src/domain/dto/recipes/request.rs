use std::str::FromStr;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::entities::recipes::Unit;
use crate::utils::string_utils::deserialize_optional_string;

/// 레시피 생성 및 전체 수정(PUT) 요청
///
/// `average_rating`은 입력으로 받지 않으며, 본문에 있어도 무시됩니다.
///
/// ```json
/// {
///   "title": "Gulyásleves",
///   "description": "Hagyományos marhahúsos leves",
///   "instructions": {"steps": ["Hagymát megpirítjuk", "..."]},
///   "preparation_time": 900,
///   "cooking_time": 5400,
///   "category_ids": ["65f1a2b3c4d5e6f708192a3b"],
///   "youtube_url": "https://www.youtube.com/watch?v=..."
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeRequest {
    #[validate(length(min = 1, max = 255, message = "제목은 1-255자 사이여야 합니다"))]
    pub title: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,

    #[serde(default)]
    pub instructions: Option<serde_json::Value>,

    /// 초 단위
    #[serde(default)]
    pub preparation_time: Option<u32>,

    /// 초 단위
    #[serde(default)]
    pub cooking_time: Option<u32>,

    #[serde(default)]
    pub category_ids: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 255, message = "YouTube URL은 255자를 넘을 수 없습니다"))]
    pub youtube_url: Option<String>,
}

/// 레시피 재료 행 생성 및 수정 요청
///
/// `quantity`는 `"2.50"` 같은 문자열이나 JSON 숫자 모두 받습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_ingredient_source"))]
pub struct RecipeIngredientRequest {
    pub recipe_id: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub ingredient_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 255, message = "재료 이름은 255자를 넘을 수 없습니다"))]
    pub manual_ingredient_name: Option<String>,

    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: BigDecimal,

    #[serde(default)]
    pub unit: Unit,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub comments: Option<String>,
}

fn validate_ingredient_source(req: &RecipeIngredientRequest) -> Result<(), ValidationError> {
    if req.ingredient_id.is_none() && req.manual_ingredient_name.is_none() {
        return Err(ValidationError::new("missing_ingredient")
            .with_message("재료를 선택하거나 재료 이름을 직접 입력해야 합니다".into()));
    }
    Ok(())
}

/// 수량을 문자열 또는 숫자에서 읽습니다.
///
/// 숫자는 JSON 표기 그대로 해석하므로 `0.1`은 정확히 `0.1`이 됩니다.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = serde_json::Value::deserialize(deserializer)?;
    let text = match raw {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        other => return Err(D::Error::custom(format!("수량 형식이 올바르지 않습니다: {}", other))),
    };

    BigDecimal::from_str(text.trim()).map_err(|e| D::Error::custom(format!("수량 형식이 올바르지 않습니다: {}", e)))
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeImageRequest {
    pub recipe_id: String,

    /// `recipe_images/` 아래의 상대 경로 또는 파일 이름
    #[validate(length(min = 1, max = 255, message = "이미지 경로는 1-255자 사이여야 합니다"))]
    pub image: String,
}

/// `?recipe_id=` 목록 필터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeFilterQuery {
    pub recipe_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_request_ignores_average_rating() {
        let json = r#"{"title": "Lecsó", "average_rating": 5.0, "description": "  "}"#;
        let request: RecipeRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.title, "Lecsó");
        assert_eq!(request.description, None);
        assert!(request.category_ids.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_recipe_request_title_required() {
        let request: RecipeRequest = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_ingredient_request_quantity_forms() {
        let from_string: RecipeIngredientRequest = serde_json::from_str(
            r#"{"recipe_id": "65f1a2b3c4d5e6f708192a3b", "manual_ingredient_name": "só", "quantity": "0.5", "unit": "csipet"}"#,
        )
        .unwrap();
        assert_eq!(from_string.quantity, BigDecimal::from_str("0.5").unwrap());
        assert_eq!(from_string.unit, Unit::Csipet);

        let from_number: RecipeIngredientRequest = serde_json::from_str(
            r#"{"recipe_id": "65f1a2b3c4d5e6f708192a3b", "manual_ingredient_name": "só", "quantity": 0.1}"#,
        )
        .unwrap();
        assert_eq!(from_number.quantity, BigDecimal::from_str("0.1").unwrap());
        assert_eq!(from_number.unit, Unit::Db);
    }

    #[test]
    fn test_ingredient_request_requires_ingredient_or_name() {
        let request: RecipeIngredientRequest = serde_json::from_str(
            r#"{"recipe_id": "65f1a2b3c4d5e6f708192a3b", "manual_ingredient_name": "  ", "quantity": 1}"#,
        )
        .unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));
    }
}
