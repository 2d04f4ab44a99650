//! 레시피 재료 행 리포지토리 (`recipe_ingredients` 컬렉션)

use std::sync::Arc;
use async_trait::async_trait;
use singleton_macro::repository;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::{doc, oid::ObjectId}, options::IndexOptions};
use crate::{
    core::errors::{AppError, AppResult, db_error},
    db::Database,
    domain::entities::recipes::RecipeIngredient,
    repositories::stores::RecipeIngredientStore,
};

#[repository(name = "recipe_ingredient", collection = "recipe_ingredients")]
pub struct RecipeIngredientRepository {
    db: Arc<Database>,
}

impl RecipeIngredientRepository {
    /// 컬렉션 인덱스를 생성합니다. 기동 시 [`create_indexes`](crate::repositories::create_indexes)에서 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let recipe_index = IndexModel::builder()
            .keys(doc! { "recipe_id": 1 })
            .options(IndexOptions::builder().name("recipe_id".to_string()).build())
            .build();

        let ingredient_index = IndexModel::builder()
            .keys(doc! { "ingredient_id": 1 })
            .options(IndexOptions::builder().name("ingredient_id".to_string()).build())
            .build();

        self.collection::<RecipeIngredient>()
            .create_indexes([recipe_index, ingredient_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl RecipeIngredientStore for RecipeIngredientRepository {
    async fn insert_recipe_ingredient(&self, mut row: RecipeIngredient) -> AppResult<RecipeIngredient> {
        row.id = Some(ObjectId::new());

        self.collection::<RecipeIngredient>()
            .insert_one(&row)
            .await
            .map_err(db_error)?;

        Ok(row)
    }

    async fn find_recipe_ingredient(&self, id: &ObjectId) -> AppResult<Option<RecipeIngredient>> {
        self.collection::<RecipeIngredient>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn list_recipe_ingredients(&self, recipe_id: Option<&ObjectId>) -> AppResult<Vec<RecipeIngredient>> {
        let filter = match recipe_id {
            Some(recipe_id) => doc! { "recipe_id": *recipe_id },
            None => doc! {},
        };

        self.collection::<RecipeIngredient>()
            .find(filter)
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn save_recipe_ingredient(&self, row: &RecipeIngredient) -> AppResult<()> {
        let id = row.id
            .ok_or_else(|| AppError::InternalError("ID 없는 레시피 재료는 저장할 수 없습니다".to_string()))?;

        self.collection::<RecipeIngredient>()
            .replace_one(doc! { "_id": id }, row)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn delete_recipe_ingredient(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<RecipeIngredient>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn delete_for_recipe(&self, recipe_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<RecipeIngredient>()
            .delete_many(doc! { "recipe_id": *recipe_id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count)
    }

    async fn delete_for_ingredient(&self, ingredient_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<RecipeIngredient>()
            .delete_many(doc! { "ingredient_id": *ingredient_id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count)
    }
}
