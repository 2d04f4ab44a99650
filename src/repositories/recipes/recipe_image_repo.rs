//! 레시피 이미지 경로 리포지토리 (`recipe_images` 컬렉션)

use std::sync::Arc;
use async_trait::async_trait;
use singleton_macro::repository;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::{doc, oid::ObjectId}, options::IndexOptions};
use crate::{
    core::errors::{AppResult, db_error},
    db::Database,
    domain::entities::recipes::RecipeImage,
    repositories::stores::RecipeImageStore,
};

#[repository(name = "recipe_image", collection = "recipe_images")]
pub struct RecipeImageRepository {
    db: Arc<Database>,
}

impl RecipeImageRepository {
    /// 컬렉션 인덱스를 생성합니다. 기동 시 [`create_indexes`](crate::repositories::create_indexes)에서 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let recipe_index = IndexModel::builder()
            .keys(doc! { "recipe_id": 1 })
            .options(IndexOptions::builder().name("recipe_id".to_string()).build())
            .build();

        self.collection::<RecipeImage>()
            .create_index(recipe_index)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl RecipeImageStore for RecipeImageRepository {
    async fn insert_image(&self, mut image: RecipeImage) -> AppResult<RecipeImage> {
        image.id = Some(ObjectId::new());

        self.collection::<RecipeImage>()
            .insert_one(&image)
            .await
            .map_err(db_error)?;

        Ok(image)
    }

    async fn find_image(&self, id: &ObjectId) -> AppResult<Option<RecipeImage>> {
        self.collection::<RecipeImage>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn list_images(&self, recipe_id: Option<&ObjectId>) -> AppResult<Vec<RecipeImage>> {
        let filter = match recipe_id {
            Some(recipe_id) => doc! { "recipe_id": *recipe_id },
            None => doc! {},
        };

        self.collection::<RecipeImage>()
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn delete_image(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<RecipeImage>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn delete_images_for_recipe(&self, recipe_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<RecipeImage>()
            .delete_many(doc! { "recipe_id": *recipe_id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count)
    }
}
