//! 레시피 이미지 참조 서비스
//!
//! 파일 자체는 다루지 않고 `recipe_images/` 아래의 경로만 기록합니다.
//! 등록은 레시피 잠금 안에서 레시피를 확인한 뒤 저장하므로 레시피 삭제와 겹치지 않습니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::recipes::{RecipeFilterQuery, RecipeImageRequest, RecipeImageResponse},
        entities::RecipeImage,
    },
    repositories::stores::{RecipeImageStore, RecipeStore, StoreHandle},
    services::recipe_locks::RecipeLocks,
    utils::string_utils::parse_object_id,
};

/// 레시피 이미지 경로 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리됩니다. 경로는
/// [`RecipeImage::new`]에서 `recipe_images/` 아래로 정규화됩니다.
#[service(name = "recipe_image")]
pub struct RecipeImageService {
    images: StoreHandle<dyn RecipeImageStore>,
    recipes: StoreHandle<dyn RecipeStore>,
    locks: Arc<RecipeLocks>,
}

impl RecipeImageService {
    /// 저장소를 직접 지정해 생성합니다.
    pub fn with_stores(images: Arc<dyn RecipeImageStore>, recipes: Arc<dyn RecipeStore>, locks: Arc<RecipeLocks>) -> Self {
        Self { images: images.into(), recipes: recipes.into(), locks }
    }

    /// 레시피가 존재할 때만 이미지 경로를 등록합니다.
    pub async fn create_image(&self, request: RecipeImageRequest) -> AppResult<RecipeImageResponse> {
        let recipe_id = parse_object_id(&request.recipe_id, "recipe_id")?;
        let _guard = self.locks.lock(recipe_id).await;

        let recipe = self.recipes
            .find_recipe(&recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound("레시피를 찾을 수 없습니다".to_string()))?;

        let image = RecipeImage::new(recipe_id, &request.image)?;
        let saved = self.images.insert_image(image).await?;

        log::info!("{} 등록: {}", saved.describe(&recipe.title), saved.image);
        Ok(RecipeImageResponse::from(saved))
    }

    pub async fn get_image(&self, id: &str) -> AppResult<RecipeImageResponse> {
        let image_id = parse_object_id(id, "recipe image id")?;

        self.images
            .find_image(&image_id)
            .await?
            .map(RecipeImageResponse::from)
            .ok_or_else(|| AppError::NotFound("레시피 이미지를 찾을 수 없습니다".to_string()))
    }

    pub async fn list_images(&self, query: RecipeFilterQuery) -> AppResult<Vec<RecipeImageResponse>> {
        let recipe_id = query
            .recipe_id
            .as_deref()
            .map(|raw| parse_object_id(raw, "recipe_id"))
            .transpose()?;

        let images = self.images.list_images(recipe_id.as_ref()).await?;
        Ok(images.into_iter().map(RecipeImageResponse::from).collect())
    }

    pub async fn delete_image(&self, id: &str) -> AppResult<()> {
        let image_id = parse_object_id(id, "recipe image id")?;

        if !self.images.delete_image(&image_id).await? {
            return Err(AppError::NotFound("레시피 이미지를 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }
}
