use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::recipes::{Recipe, RecipeImage, RecipeIngredient, Unit, serialize_quantity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<serde_json::Value>,
    pub preparation_time: Option<u32>,
    pub cooking_time: Option<u32>,
    pub total_time: Option<u32>,
    pub average_rating: f64,
    pub category_ids: Vec<String>,
    pub youtube_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        let total_time = recipe.total_time();

        Self {
            id: recipe.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: recipe.title,
            description: recipe.description,
            instructions: recipe.instructions,
            preparation_time: recipe.preparation_time,
            cooking_time: recipe.cooking_time,
            total_time,
            average_rating: recipe.average_rating,
            category_ids: recipe.category_ids.iter().map(|id| id.to_hex()).collect(),
            youtube_url: recipe.youtube_url,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// 레시피 상세 응답
///
/// 평점 수와 재료 행, 이미지를 함께 내려줍니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    pub total_ratings: u64,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub images: Vec<RecipeImageResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredientResponse {
    pub id: String,
    pub recipe_id: String,
    pub ingredient_id: Option<String>,
    pub manual_ingredient_name: Option<String>,
    #[serde(serialize_with = "serialize_quantity")]
    pub quantity: BigDecimal,
    pub unit: Unit,
    pub unit_label: String,
    pub comments: Option<String>,
    /// `"2.00 Evőkanál tejföl"`
    pub display: String,
}

impl RecipeIngredientResponse {
    /// `ingredient_name`은 참조된 재료 마스터의 이름입니다.
    pub fn new(row: RecipeIngredient, ingredient_name: Option<&str>) -> Self {
        let display = row.describe(ingredient_name);

        Self {
            id: row.id.map(|id| id.to_hex()).unwrap_or_default(),
            recipe_id: row.recipe_id.to_hex(),
            ingredient_id: row.ingredient_id.map(|id| id.to_hex()),
            manual_ingredient_name: row.manual_ingredient_name,
            quantity: row.quantity,
            unit: row.unit,
            unit_label: row.unit.label().to_string(),
            comments: row.comments,
            display,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeImageResponse {
    pub id: String,
    pub recipe_id: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl From<RecipeImage> for RecipeImageResponse {
    fn from(image: RecipeImage) -> Self {
        Self {
            id: image.id.map(|id| id.to_hex()).unwrap_or_default(),
            recipe_id: image.recipe_id.to_hex(),
            image: image.image,
            created_at: image.created_at,
        }
    }
}

/// `GET /api/v1/units` 항목
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitResponse {
    pub code: String,
    pub label: String,
}

impl From<Unit> for UnitResponse {
    fn from(unit: Unit) -> Self {
        Self {
            code: unit.code().to_string(),
            label: unit.label().to_string(),
        }
    }
}
