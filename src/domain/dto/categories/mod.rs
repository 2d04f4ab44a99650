//! `/api/v1/categories` 요청/응답 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::categories::MealCategory;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 50, message = "카테고리 이름은 1-50자 사이여야 합니다"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
}

impl From<MealCategory> for CategoryResponse {
    fn from(category: MealCategory) -> Self {
        Self {
            id: category.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: category.name,
        }
    }
}
