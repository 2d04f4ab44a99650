//! 재료 마스터 서비스
//!
//! 이름은 전체에서 유일합니다. 재료를 삭제하면 그 재료를 참조하던 레시피 재료 행도 함께 삭제됩니다.
//! 삭제는 재료 ID로 [`RecipeLocks`]를 잡아, 같은 재료를 참조하는 행 생성과 겹치지 않게 합니다.

use std::sync::Arc;
use singleton_macro::service;
use mongodb::bson::oid::ObjectId;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::ingredients::{IngredientRequest, IngredientResponse},
        entities::Ingredient,
    },
    repositories::stores::{IngredientStore, RecipeIngredientStore, StoreHandle},
    services::recipe_locks::RecipeLocks,
    utils::string_utils::{parse_object_id, validate_required_string},
};

const DUPLICATE_NAME: &str = "이미 존재하는 재료 이름입니다";

/// 재료 마스터 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리됩니다.
///
/// # 예제
///
/// ```rust,ignore
/// let service = IngredientService::instance();
/// let paprika = service.create_ingredient(IngredientRequest { name: "paprika".to_string() }).await?;
/// ```
#[service(name = "ingredient")]
pub struct IngredientService {
    ingredients: StoreHandle<dyn IngredientStore>,
    rows: StoreHandle<dyn RecipeIngredientStore>,
    locks: Arc<RecipeLocks>,
}

impl IngredientService {
    /// 저장소를 직접 지정해 생성합니다.
    pub fn with_stores(
        ingredients: Arc<dyn IngredientStore>,
        rows: Arc<dyn RecipeIngredientStore>,
        locks: Arc<RecipeLocks>,
    ) -> Self {
        Self { ingredients: ingredients.into(), rows: rows.into(), locks }
    }

    pub async fn create_ingredient(&self, request: IngredientRequest) -> AppResult<IngredientResponse> {
        let name = validate_required_string(&request.name, "name")?;

        if self.ingredients.find_ingredient_by_name(&name).await?.is_some() {
            return Err(AppError::ConflictError(DUPLICATE_NAME.to_string()));
        }

        let saved = self.ingredients.insert_ingredient(Ingredient::new(name)).await?;
        log::info!("재료 생성: {}", saved);
        Ok(IngredientResponse::from(saved))
    }

    pub async fn get_ingredient(&self, id: &str) -> AppResult<IngredientResponse> {
        let ingredient_id = parse_object_id(id, "ingredient id")?;
        self.require(&ingredient_id).await.map(IngredientResponse::from)
    }

    pub async fn list_ingredients(&self) -> AppResult<Vec<IngredientResponse>> {
        let ingredients = self.ingredients.list_ingredients().await?;
        Ok(ingredients.into_iter().map(IngredientResponse::from).collect())
    }

    pub async fn update_ingredient(&self, id: &str, request: IngredientRequest) -> AppResult<IngredientResponse> {
        let ingredient_id = parse_object_id(id, "ingredient id")?;
        let name = validate_required_string(&request.name, "name")?;
        let mut ingredient = self.require(&ingredient_id).await?;

        if let Some(other) = self.ingredients.find_ingredient_by_name(&name).await? {
            if other.id != ingredient.id {
                return Err(AppError::ConflictError(DUPLICATE_NAME.to_string()));
            }
        }

        ingredient.name = name;
        self.ingredients.save_ingredient(&ingredient).await?;
        Ok(IngredientResponse::from(ingredient))
    }

    pub async fn delete_ingredient(&self, id: &str) -> AppResult<()> {
        let ingredient_id = parse_object_id(id, "ingredient id")?;

        let _guard = self.locks.lock(ingredient_id).await;
        self.require(&ingredient_id).await?;

        let rows = self.rows.delete_for_ingredient(&ingredient_id).await?;
        self.ingredients.delete_ingredient(&ingredient_id).await?;

        log::info!("재료 삭제: {} (레시피 재료 행 {}건)", ingredient_id, rows);
        Ok(())
    }

    async fn require(&self, id: &ObjectId) -> AppResult<Ingredient> {
        self.ingredients
            .find_ingredient(id)
            .await?
            .ok_or_else(|| AppError::NotFound("재료를 찾을 수 없습니다".to_string()))
    }
}
