//! 식사 카테고리 서비스
//!
//! 카테고리를 삭제하면 레시피의 `category_ids`에서 해당 ID가 빠집니다. 레시피 자체는 남습니다.

use std::sync::Arc;
use singleton_macro::service;
use mongodb::bson::oid::ObjectId;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::categories::{CategoryRequest, CategoryResponse},
        entities::MealCategory,
    },
    repositories::stores::{CategoryStore, RecipeStore, StoreHandle},
    utils::string_utils::{parse_object_id, validate_required_string},
};

const DUPLICATE_NAME: &str = "이미 존재하는 카테고리 이름입니다";

/// 식사 카테고리 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리됩니다.
#[service(name = "category")]
pub struct CategoryService {
    categories: StoreHandle<dyn CategoryStore>,
    recipes: StoreHandle<dyn RecipeStore>,
}

impl CategoryService {
    /// 저장소를 직접 지정해 생성합니다.
    pub fn with_stores(categories: Arc<dyn CategoryStore>, recipes: Arc<dyn RecipeStore>) -> Self {
        Self { categories: categories.into(), recipes: recipes.into() }
    }

    /// 이름이 겹치지 않는 카테고리를 생성합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(CategoryResponse)` - 생성된 카테고리
    /// * `Err(AppError::ConflictError)` - 같은 이름이 이미 있음
    pub async fn create_category(&self, request: CategoryRequest) -> AppResult<CategoryResponse> {
        let name = validate_required_string(&request.name, "name")?;

        if self.categories.find_category_by_name(&name).await?.is_some() {
            return Err(AppError::ConflictError(DUPLICATE_NAME.to_string()));
        }

        let saved = self.categories.insert_category(MealCategory::new(name)).await?;
        log::info!("카테고리 생성: {}", saved);
        Ok(CategoryResponse::from(saved))
    }

    pub async fn get_category(&self, id: &str) -> AppResult<CategoryResponse> {
        let category_id = parse_object_id(id, "category id")?;
        self.require(&category_id).await.map(CategoryResponse::from)
    }

    pub async fn list_categories(&self) -> AppResult<Vec<CategoryResponse>> {
        let categories = self.categories.list_categories().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn update_category(&self, id: &str, request: CategoryRequest) -> AppResult<CategoryResponse> {
        let category_id = parse_object_id(id, "category id")?;
        let name = validate_required_string(&request.name, "name")?;
        let mut category = self.require(&category_id).await?;

        if let Some(other) = self.categories.find_category_by_name(&name).await? {
            if other.id != category.id {
                return Err(AppError::ConflictError(DUPLICATE_NAME.to_string()));
            }
        }

        category.name = name;
        self.categories.save_category(&category).await?;
        Ok(CategoryResponse::from(category))
    }

    /// 카테고리를 삭제하고 이를 참조하던 레시피에서 떼어냅니다.
    ///
    /// 레시피 자체는 삭제되지 않습니다.
    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        let category_id = parse_object_id(id, "category id")?;
        self.require(&category_id).await?;

        let detached = self.recipes.remove_category(&category_id).await?;
        self.categories.delete_category(&category_id).await?;

        log::info!("카테고리 삭제: {} (레시피 {}건에서 제거)", category_id, detached);
        Ok(())
    }

    async fn require(&self, id: &ObjectId) -> AppResult<MealCategory> {
        self.categories
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
    }
}
