//! 식사 카테고리 리포지토리 (`meal_categories` 컬렉션, `name` 유니크 인덱스)

use std::sync::Arc;
use async_trait::async_trait;
use singleton_macro::repository;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::{doc, oid::ObjectId}, options::IndexOptions};
use crate::{
    core::errors::{AppError, AppResult, db_error, write_error},
    db::Database,
    domain::entities::categories::MealCategory,
    repositories::stores::CategoryStore,
};

const DUPLICATE_NAME: &str = "이미 존재하는 카테고리 이름입니다";

#[repository(name = "category", collection = "meal_categories")]
pub struct CategoryRepository {
    db: Arc<Database>,
}

impl CategoryRepository {
    /// 컬렉션 인덱스를 생성합니다. 기동 시 [`create_indexes`](crate::repositories::create_indexes)에서 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_unique".to_string())
                .build())
            .build();

        self.collection::<MealCategory>()
            .create_index(name_index)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn insert_category(&self, mut category: MealCategory) -> AppResult<MealCategory> {
        category.id = Some(ObjectId::new());

        self.collection::<MealCategory>()
            .insert_one(&category)
            .await
            .map_err(|e| write_error(e, DUPLICATE_NAME))?;

        Ok(category)
    }

    async fn find_category(&self, id: &ObjectId) -> AppResult<Option<MealCategory>> {
        self.collection::<MealCategory>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn find_category_by_name(&self, name: &str) -> AppResult<Option<MealCategory>> {
        self.collection::<MealCategory>()
            .find_one(doc! { "name": name })
            .await
            .map_err(db_error)
    }

    async fn list_categories(&self) -> AppResult<Vec<MealCategory>> {
        self.collection::<MealCategory>()
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn save_category(&self, category: &MealCategory) -> AppResult<()> {
        let id = category.id
            .ok_or_else(|| AppError::InternalError("ID 없는 카테고리는 저장할 수 없습니다".to_string()))?;

        self.collection::<MealCategory>()
            .replace_one(doc! { "_id": id }, category)
            .await
            .map_err(|e| write_error(e, DUPLICATE_NAME))?;

        Ok(())
    }

    async fn delete_category(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<MealCategory>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }
}
