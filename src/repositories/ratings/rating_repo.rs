//! # 평점 리포지토리
//!
//! `user_ratings` 컬렉션. (user_id, recipe_id) 복합 유니크 인덱스로
//! 사용자당 레시피 하나에 평점 한 건을 보장합니다.

use std::sync::Arc;
use async_trait::async_trait;
use singleton_macro::repository;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::{Document, doc, oid::ObjectId}, options::IndexOptions};
use crate::{
    core::errors::{AppResult, db_error, write_error},
    db::Database,
    domain::entities::ratings::UserRating,
    repositories::stores::RatingStore,
};

const DUPLICATE_RATING: &str = "이 사용자는 이미 이 레시피에 평점을 남겼습니다";

/// 평점 MongoDB 리포지토리
///
/// 캐시를 두지 않습니다. 평균 재계산은 항상 MongoDB의 현재 평점 집합을 읽습니다.
#[repository(name = "rating", collection = "user_ratings")]
pub struct RatingRepository {
    db: Arc<Database>,
}

impl RatingRepository {
    async fn find_many(&self, filter: Document) -> AppResult<Vec<UserRating>> {
        self.collection::<UserRating>()
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    /// 컬렉션 인덱스를 생성합니다. 기동 시 [`create_indexes`](crate::repositories::create_indexes)에서 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let user_recipe_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "recipe_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_recipe_unique".to_string())
                .build())
            .build();

        let recipe_index = IndexModel::builder()
            .keys(doc! { "recipe_id": 1 })
            .options(IndexOptions::builder().name("recipe_id".to_string()).build())
            .build();

        self.collection::<UserRating>()
            .create_indexes([user_recipe_index, recipe_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl RatingStore for RatingRepository {
    async fn list_ratings(&self, recipe_id: &ObjectId) -> AppResult<Vec<UserRating>> {
        self.find_many(doc! { "recipe_id": *recipe_id }).await
    }

    async fn list_ratings_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<UserRating>> {
        self.find_many(doc! { "user_id": *user_id }).await
    }

    async fn list_all_ratings(&self) -> AppResult<Vec<UserRating>> {
        self.find_many(doc! {}).await
    }

    async fn find_rating(&self, id: &ObjectId) -> AppResult<Option<UserRating>> {
        self.collection::<UserRating>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn find_user_rating(&self, user_id: &ObjectId, recipe_id: &ObjectId) -> AppResult<Option<UserRating>> {
        self.collection::<UserRating>()
            .find_one(doc! { "user_id": *user_id, "recipe_id": *recipe_id })
            .await
            .map_err(db_error)
    }

    /// 평점 저장 (ID가 있으면 교체, 없으면 새 ID로 삽입)
    ///
    /// # 인자
    ///
    /// * `rating` - 저장할 평점. 새 평점이면 `id`가 `None`입니다
    ///
    /// # 반환값
    ///
    /// * `Ok(UserRating)` - ID가 채워진 평점
    /// * `Err(AppError::ConflictError)` - 같은 (user_id, recipe_id) 평점이 이미 있음 (유니크 인덱스 위반)
    /// * `Err(AppError::DatabaseError)` - 그 밖의 쓰기 오류
    async fn save_rating(&self, mut rating: UserRating) -> AppResult<UserRating> {
        match rating.id {
            Some(id) => {
                self.collection::<UserRating>()
                    .replace_one(doc! { "_id": id }, &rating)
                    .await
                    .map_err(|e| write_error(e, DUPLICATE_RATING))?;
            }
            None => {
                rating.id = Some(ObjectId::new());
                self.collection::<UserRating>()
                    .insert_one(&rating)
                    .await
                    .map_err(|e| write_error(e, DUPLICATE_RATING))?;
            }
        }

        Ok(rating)
    }

    async fn delete_rating(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<UserRating>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    /// 레시피 삭제 시 그 레시피의 평점을 한 번에 지웁니다.
    async fn delete_ratings_for_recipe(&self, recipe_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<UserRating>()
            .delete_many(doc! { "recipe_id": *recipe_id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count)
    }
}
