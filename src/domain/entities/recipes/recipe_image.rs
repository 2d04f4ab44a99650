//! Recipe Image Entity
//!
//! 이미지 파일 자체는 다루지 않고, `recipe_images/` 아래의 리소스 경로만 저장합니다.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, AppResult};

/// 이미지 경로가 놓이는 디렉터리
pub const IMAGE_DIRECTORY: &str = "recipe_images/";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeImage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub recipe_id: ObjectId,
    /// `recipe_images/`로 시작하는 상대 경로
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl RecipeImage {
    pub fn new(recipe_id: ObjectId, image: &str) -> AppResult<Self> {
        Ok(Self {
            id: None,
            recipe_id,
            image: normalize_image_path(image)?,
            created_at: Utc::now(),
        })
    }

    pub fn describe(&self, recipe_title: &str) -> String {
        format!("Image for {}", recipe_title)
    }
}

/// 이미지 경로를 `recipe_images/` 아래의 상대 경로로 정규화합니다.
///
/// ```text
/// "gulyas.jpg"                → "recipe_images/gulyas.jpg"
/// "/recipe_images/gulyas.jpg" → "recipe_images/gulyas.jpg"
/// "../etc/passwd"             → ValidationError
/// ```
pub fn normalize_image_path(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim().replace('\\', "/");
    let relative = trimmed.trim_start_matches('/');
    let relative = relative.strip_prefix(IMAGE_DIRECTORY).unwrap_or(relative);

    let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        return Err(AppError::ValidationError("이미지 경로가 비어 있습니다".to_string()));
    }

    if segments.iter().any(|s| *s == "." || *s == "..") {
        return Err(AppError::ValidationError(format!(
            "이미지 경로에 상대 경로 구성 요소를 사용할 수 없습니다: {}",
            raw
        )));
    }

    Ok(format!("{}{}", IMAGE_DIRECTORY, segments.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_image_path() {
        assert_eq!(normalize_image_path("gulyas.jpg").unwrap(), "recipe_images/gulyas.jpg");
        assert_eq!(normalize_image_path("/recipe_images/gulyas.jpg").unwrap(), "recipe_images/gulyas.jpg");
        assert_eq!(normalize_image_path("2024//leves.png").unwrap(), "recipe_images/2024/leves.png");
    }

    #[test]
    fn test_normalize_image_path_rejects_traversal_and_empty() {
        assert!(normalize_image_path("../secret.png").is_err());
        assert!(normalize_image_path("recipe_images/").is_err());
        assert!(normalize_image_path("   ").is_err());
    }
}
