//! 재료 리포지토리 (`ingredients` 컬렉션, `name` 유니크 인덱스)

use std::sync::Arc;
use async_trait::async_trait;
use singleton_macro::repository;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::{doc, oid::ObjectId}, options::IndexOptions};
use crate::{
    core::errors::{AppError, AppResult, db_error, write_error},
    db::Database,
    domain::entities::ingredients::Ingredient,
    repositories::stores::IngredientStore,
};

const DUPLICATE_NAME: &str = "이미 존재하는 재료 이름입니다";

#[repository(name = "ingredient", collection = "ingredients")]
pub struct IngredientRepository {
    db: Arc<Database>,
}

impl IngredientRepository {
    /// 컬렉션 인덱스를 생성합니다. 기동 시 [`create_indexes`](crate::repositories::create_indexes)에서 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_unique".to_string())
                .build())
            .build();

        self.collection::<Ingredient>()
            .create_index(name_index)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl IngredientStore for IngredientRepository {
    async fn insert_ingredient(&self, mut ingredient: Ingredient) -> AppResult<Ingredient> {
        ingredient.id = Some(ObjectId::new());

        self.collection::<Ingredient>()
            .insert_one(&ingredient)
            .await
            .map_err(|e| write_error(e, DUPLICATE_NAME))?;

        Ok(ingredient)
    }

    async fn find_ingredient(&self, id: &ObjectId) -> AppResult<Option<Ingredient>> {
        self.collection::<Ingredient>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn find_ingredient_by_name(&self, name: &str) -> AppResult<Option<Ingredient>> {
        self.collection::<Ingredient>()
            .find_one(doc! { "name": name })
            .await
            .map_err(db_error)
    }

    async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        self.collection::<Ingredient>()
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn save_ingredient(&self, ingredient: &Ingredient) -> AppResult<()> {
        let id = ingredient.id
            .ok_or_else(|| AppError::InternalError("ID 없는 재료는 저장할 수 없습니다".to_string()))?;

        self.collection::<Ingredient>()
            .replace_one(doc! { "_id": id }, ingredient)
            .await
            .map_err(|e| write_error(e, DUPLICATE_NAME))?;

        Ok(())
    }

    async fn delete_ingredient(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Ingredient>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }
}
