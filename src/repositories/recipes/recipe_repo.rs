//! # 레시피 리포지토리 구현
//!
//! MongoDB `recipes` 컬렉션을 주 저장소로, Redis를 상세 조회 캐시로 사용합니다.
//!
//! ## 캐싱 전략
//!
//! - **키 패턴**: `recipe_repository:{id}` (`#[repository]`가 생성하는 `cache_key`)
//! - **TTL**: `CacheConfig::recipe_ttl_secs()` (기본 600초)
//! - **무효화**: 저장, 삭제, 카테고리 제거 시 해당 키 삭제
//!
//! 캐시 오류는 `warn` 로그만 남기고 MongoDB 결과로 진행합니다.

use std::sync::Arc;
use async_trait::async_trait;
use singleton_macro::repository;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::{doc, oid::ObjectId}, options::IndexOptions};
use crate::{
    caching::redis::RedisClient,
    config::CacheConfig,
    core::{errors::{AppError, AppResult, db_error}, registry::Repository},
    db::Database,
    domain::entities::recipes::Recipe,
    repositories::stores::RecipeStore,
};

/// 레시피 MongoDB 리포지토리
///
/// `#[repository]` 매크로가 싱글톤 `instance()`, `collection::<T>()`, `cache_key()`를 생성하고
/// `db`, `redis` 필드를 `ServiceLocator`에서 주입합니다.
///
/// # 예제
///
/// ```rust,ignore
/// let repo = RecipeRepository::instance();
/// let recipe = repo.find_recipe(&recipe_id).await?;
/// ```
#[repository(name = "recipe", collection = "recipes")]
pub struct RecipeRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl RecipeRepository {
    async fn evict(&self, id: &ObjectId) {
        if let Err(e) = self.redis.del(&self.cache_key(&id.to_hex())).await {
            log::warn!("레시피 캐시 무효화 실패 ({}): {}", id, e);
        }
    }

    /// 컬렉션 인덱스를 생성합니다. 기동 시 [`create_indexes`](crate::repositories::create_indexes)에서 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let category_index = IndexModel::builder()
            .keys(doc! { "category_ids": 1 })
            .options(IndexOptions::builder().name("category_ids".to_string()).build())
            .build();

        let title_index = IndexModel::builder()
            .keys(doc! { "title": 1 })
            .options(IndexOptions::builder().name("title_asc".to_string()).build())
            .build();

        self.collection::<Recipe>()
            .create_indexes([category_index, title_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl RecipeStore for RecipeRepository {
    async fn insert_recipe(&self, mut recipe: Recipe) -> AppResult<Recipe> {
        recipe.id = Some(ObjectId::new());

        self.collection::<Recipe>()
            .insert_one(&recipe)
            .await
            .map_err(db_error)?;

        Ok(recipe)
    }

    /// ID로 레시피 조회 (캐시 우선)
    ///
    /// # 인자
    ///
    /// * `id` - 레시피 ObjectId
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(Recipe))` - 캐시 또는 MongoDB에서 찾은 레시피
    /// * `Ok(None)` - 없는 레시피
    /// * `Err(AppError::DatabaseError)` - MongoDB 조회 오류. 캐시 오류는 여기까지 오지 않습니다
    ///
    /// # 캐싱 흐름
    ///
    /// 1. **Redis 조회**: `recipe_repository:{id}` 키 확인
    /// 2. **MongoDB 조회**: 캐시 미스 시 `_id`로 검색
    /// 3. **캐시 저장**: 찾은 레시피를 TTL과 함께 저장
    async fn find_recipe(&self, id: &ObjectId) -> AppResult<Option<Recipe>> {
        let cache_key = self.cache_key(&id.to_hex());

        match self.redis.get::<Recipe>(&cache_key).await {
            Ok(Some(cached)) => return Ok(Some(cached)),
            Ok(None) => {}
            Err(e) => log::warn!("레시피 캐시 조회 실패 ({}): {}", cache_key, e),
        }

        let recipe = self.collection::<Recipe>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        if let Some(ref recipe) = recipe {
            if let Err(e) = self.redis
                .set_with_expiry(&cache_key, recipe, CacheConfig::recipe_ttl_secs())
                .await
            {
                log::warn!("레시피 캐시 저장 실패 ({}): {}", cache_key, e);
            }
        }

        Ok(recipe)
    }

    async fn list_recipes(&self) -> AppResult<Vec<Recipe>> {
        self.collection::<Recipe>()
            .find(doc! {})
            .sort(doc! { "title": 1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    /// 레시피 문서 전체를 교체하고 캐시 키를 지웁니다.
    async fn save_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        let Some(id) = recipe.id else {
            return Err(AppError::InternalError("ID 없는 레시피는 저장할 수 없습니다".to_string()));
        };

        self.collection::<Recipe>()
            .replace_one(doc! { "_id": id }, recipe)
            .await
            .map_err(db_error)?;

        self.evict(&id).await;
        Ok(())
    }

    async fn delete_recipe(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Recipe>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        self.evict(id).await;
        Ok(result.deleted_count > 0)
    }

    /// 모든 레시피에서 카테고리 참조를 제거합니다.
    ///
    /// # 반환값
    ///
    /// 수정된 레시피 수. 영향받은 레시피의 캐시는 모두 무효화됩니다.
    async fn remove_category(&self, category_id: &ObjectId) -> AppResult<u64> {
        let affected: Vec<Recipe> = self.collection::<Recipe>()
            .find(doc! { "category_ids": *category_id })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)?;

        if affected.is_empty() {
            return Ok(0);
        }

        let result = self.collection::<Recipe>()
            .update_many(
                doc! { "category_ids": *category_id },
                doc! { "$pull": { "category_ids": *category_id } },
            )
            .await
            .map_err(db_error)?;

        for recipe in &affected {
            if let Some(id) = recipe.id {
                self.evict(&id).await;
            }
        }

        Ok(result.modified_count)
    }
}
