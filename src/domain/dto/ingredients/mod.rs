//! `/api/v1/ingredients` 요청/응답 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::ingredients::Ingredient;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngredientRequest {
    #[validate(length(min = 1, max = 255, message = "재료 이름은 1-255자 사이여야 합니다"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientResponse {
    pub id: String,
    pub name: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: ingredient.name,
        }
    }
}
