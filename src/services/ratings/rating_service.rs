//! # Rating Aggregator
//!
//! 평점의 생성, 수정, 삭제를 담당하고, 변경이 있을 때마다 해당 레시피의
//! `average_rating`을 현재 평점 집합으로부터 다시 계산해 저장합니다.
//!
//! ## 처리 흐름
//!
//! ```text
//! upsert_rating(user, recipe, r)
//!   ├─ r ∉ [0, 5]        → ValidationError (저장·재계산 없음)
//!   ├─ 프로필/레시피 확인 → NotFound
//!   └─ RecipeLocks::lock(recipe)
//!        ├─ 기존 (user, recipe) 평점 교체 또는 신규 저장
//!        ├─ 프로필 재확인: 그 사이 삭제되었으면 저장한 평점을 지우고 NotFound
//!        └─ recompute: 평균을 소수 둘째 자리로 반올림, 평점이 없으면 0.0
//! ```
//!
//! 평균 계산은 같은 레시피 잠금 안에서 변경 직후에 실행되므로, 재계산은 항상
//! 직전 변경이 반영된 평점 집합을 읽습니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::ratings::{RatingChangeResponse, RatingQuery, RatingRequest, RatingResponse, UpdateRatingRequest},
        entities::{Recipe, UserRating, check_rating, rounded_average},
    },
    repositories::stores::{RatingStore, RecipeStore, StoreHandle, UserProfileStore},
    services::recipe_locks::RecipeLocks,
    utils::string_utils::parse_object_id,
};

/// 평점 집계 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리됩니다. 저장소 핸들은 MongoDB
/// 리포지토리로, `locks`는 `main`에서 등록한 공유 [`RecipeLocks`]로 채워집니다.
/// [`RecipeService`](crate::services::recipes::RecipeService)와 같은 잠금 테이블을
/// 써야 레시피 수정과 평균 재계산이 겹치지 않습니다.
///
/// # 예제
///
/// ```rust,ignore
/// let service = RatingService::instance();
/// let change = service.upsert_rating(RatingRequest {
///     user_id: profile_id.to_hex(),
///     recipe_id: recipe_id.to_hex(),
///     rating: 4,
/// }).await?;
///
/// println!("새 평균: {}", change.average_rating);
/// ```
#[service(name = "rating")]
pub struct RatingService {
    ratings: StoreHandle<dyn RatingStore>,
    recipes: StoreHandle<dyn RecipeStore>,
    profiles: StoreHandle<dyn UserProfileStore>,
    locks: Arc<RecipeLocks>,
}

impl RatingService {
    /// 저장소와 잠금 테이블을 직접 지정해 생성합니다.
    ///
    /// `instance()`는 MongoDB 리포지토리를 쓰므로, 메모리 저장소로 동작을 확인할 때 사용합니다.
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// let store = MemoryCatalog::new();
    /// let service = RatingService::with_stores(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     Arc::new(RecipeLocks::new()),
    /// );
    /// ```
    pub fn with_stores(
        ratings: Arc<dyn RatingStore>,
        recipes: Arc<dyn RecipeStore>,
        profiles: Arc<dyn UserProfileStore>,
        locks: Arc<RecipeLocks>,
    ) -> Self {
        Self {
            ratings: ratings.into(),
            recipes: recipes.into(),
            profiles: profiles.into(),
            locks,
        }
    }

    /// 평점 등록 또는 교체
    ///
    /// 같은 사용자가 같은 레시피에 이미 평점을 남겼다면 그 값을 바꾸고,
    /// 없으면 새로 저장합니다. 어느 쪽이든 레시피 평균을 다시 계산해 함께 돌려줍니다.
    ///
    /// # 인자
    ///
    /// * `request` - 사용자 프로필 ID, 레시피 ID, 0~5 사이의 평점
    ///
    /// # 반환값
    ///
    /// * `Ok(RatingChangeResponse)` - 저장된 평점과 재계산된 `average_rating`
    /// * `Err(AppError::ValidationError)` - 평점 범위 초과 또는 잘못된 ObjectId. 아무것도 저장되지 않습니다
    /// * `Err(AppError::NotFound)` - 프로필 또는 레시피가 없음
    /// * `Err(AppError::DatabaseError)` - 저장소 오류
    ///
    /// # 처리 과정
    ///
    /// 1. **값 검사**: 범위와 ID 형식을 잠금 전에 확인
    /// 2. **레시피 잠금**: 같은 레시피의 다른 변경과 직렬화
    /// 3. **교체 또는 생성**: `(user_id, recipe_id)` 기존 평점 조회
    /// 4. **프로필 재확인**: 대기 중 프로필이 삭제되었으면 저장분을 되돌림
    /// 5. **재계산**: 평균을 레시피에 저장
    pub async fn upsert_rating(&self, request: RatingRequest) -> AppResult<RatingChangeResponse> {
        let value = check_rating(request.rating)?;
        let user_id = parse_object_id(&request.user_id, "user_id")?;
        let recipe_id = parse_object_id(&request.recipe_id, "recipe_id")?;

        self.require_profile(&user_id).await?;

        let _guard = self.locks.lock(recipe_id).await;

        let mut recipe = self.require_recipe(&recipe_id).await?;

        let rating = match self.ratings.find_user_rating(&user_id, &recipe_id).await? {
            Some(mut existing) => {
                existing.change_rating(value)?;
                existing
            }
            None => UserRating::new(user_id, recipe_id, value)?,
        };

        let saved = self.ratings.save_rating(rating).await?;

        // 프로필 삭제는 레시피 잠금을 잡지 않으므로 저장 후 다시 확인합니다.
        if let Err(e) = self.require_profile(&user_id).await {
            if let Some(rating_id) = saved.id {
                self.ratings.delete_rating(&rating_id).await?;
            }
            self.recompute_locked(&mut recipe).await?;
            log::warn!("평점 저장 취소: 사용자 {}의 프로필이 삭제되었습니다 (recipe={})", user_id, recipe_id);
            return Err(e);
        }

        let average_rating = self.recompute_locked(&mut recipe).await?;

        log::info!(
            "평점 저장: recipe={} user={} rating={} → average={}",
            recipe_id, user_id, value, average_rating
        );

        Ok(RatingChangeResponse {
            rating: RatingResponse::from(saved),
            average_rating,
        })
    }

    /// 기존 평점의 값을 바꾼 뒤 평균을 재계산합니다.
    ///
    /// # 인자
    ///
    /// * `id` - 평점 ObjectId (16진수 문자열)
    /// * `request` - 새 평점 값
    ///
    /// # 반환값
    ///
    /// * `Ok(RatingChangeResponse)` - 수정된 평점과 새 평균
    /// * `Err(AppError::ValidationError)` - 범위 초과. 기존 값과 평균은 그대로입니다
    /// * `Err(AppError::NotFound)` - 평점이 없거나 잠금 대기 중 삭제됨
    pub async fn update_rating(&self, id: &str, request: UpdateRatingRequest) -> AppResult<RatingChangeResponse> {
        let value = check_rating(request.rating)?;
        let rating_id = parse_object_id(id, "rating id")?;

        let recipe_id = self.require_rating(&rating_id).await?.recipe_id;
        let _guard = self.locks.lock(recipe_id).await;

        // 잠금 대기 중 삭제되었을 수 있으므로 다시 읽습니다.
        let mut rating = self.require_rating(&rating_id).await?;
        rating.change_rating(value)?;

        let mut recipe = self.require_recipe(&recipe_id).await?;
        let saved = self.ratings.save_rating(rating).await?;
        let average_rating = self.recompute_locked(&mut recipe).await?;

        log::info!("평점 수정: rating={} rating={} → average={}", rating_id, value, average_rating);

        Ok(RatingChangeResponse {
            rating: RatingResponse::from(saved),
            average_rating,
        })
    }

    /// 평점을 삭제하고 재계산된 평균을 반환합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(f64)` - 남은 평점의 평균. 마지막 평점이었다면 `0.0`
    /// * `Err(AppError::NotFound)` - 평점이 없음
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// let average = service.delete_rating(&rating_id).await?;
    /// assert_eq!(average, 0.0);
    /// ```
    pub async fn delete_rating(&self, id: &str) -> AppResult<f64> {
        let rating_id = parse_object_id(id, "rating id")?;

        let recipe_id = self.require_rating(&rating_id).await?.recipe_id;
        let _guard = self.locks.lock(recipe_id).await;

        if !self.ratings.delete_rating(&rating_id).await? {
            return Err(AppError::NotFound("평점을 찾을 수 없습니다".to_string()));
        }

        let average_rating = match self.recipes.find_recipe(&recipe_id).await? {
            Some(mut recipe) => self.recompute_locked(&mut recipe).await?,
            None => 0.0,
        };

        log::info!("평점 삭제: rating={} recipe={} → average={}", rating_id, recipe_id, average_rating);
        Ok(average_rating)
    }

    pub async fn get_rating(&self, id: &str) -> AppResult<RatingResponse> {
        let rating_id = parse_object_id(id, "rating id")?;
        Ok(RatingResponse::from(self.require_rating(&rating_id).await?))
    }

    /// `recipe_id`, `user_id` 필터를 적용한 평점 목록
    pub async fn list_ratings(&self, query: RatingQuery) -> AppResult<Vec<RatingResponse>> {
        let recipe_id = query.recipe_id.as_deref().map(|id| parse_object_id(id, "recipe_id")).transpose()?;
        let user_id = query.user_id.as_deref().map(|id| parse_object_id(id, "user_id")).transpose()?;

        let ratings = match (recipe_id, user_id) {
            (Some(recipe_id), _) => self.ratings.list_ratings(&recipe_id).await?,
            (None, Some(user_id)) => self.ratings.list_ratings_by_user(&user_id).await?,
            (None, None) => self.ratings.list_all_ratings().await?,
        };

        Ok(ratings
            .into_iter()
            .filter(|rating| user_id.is_none_or(|user_id| rating.user_id == user_id))
            .map(RatingResponse::from)
            .collect())
    }

    /// 레시피 잠금을 잡고 평균을 다시 계산합니다.
    ///
    /// 평점 변경은 모두 스스로 재계산하므로, 저장된 평균을 직접 맞출 때만 호출합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(f64)` - 저장된 새 평균
    /// * `Err(AppError::NotFound)` - 레시피가 없음
    pub async fn recompute(&self, recipe_id: &ObjectId) -> AppResult<f64> {
        let _guard = self.locks.lock(*recipe_id).await;
        let mut recipe = self.require_recipe(recipe_id).await?;
        self.recompute_locked(&mut recipe).await
    }

    /// 사용자의 모든 평점 정리
    ///
    /// 프로필 삭제 시 호출됩니다. 사용자가 평가한 레시피마다 잠금을 잡고
    /// 평점을 지운 뒤 평균을 다시 계산합니다. 레시피는 ID 순서로 처리합니다.
    ///
    /// # 인자
    ///
    /// * `user_id` - 삭제된 프로필의 ObjectId
    ///
    /// # 반환값
    ///
    /// 실제로 삭제된 평점 수
    pub async fn remove_ratings_for_user(&self, user_id: &ObjectId) -> AppResult<usize> {
        let mut recipe_ids: Vec<ObjectId> = self.ratings
            .list_ratings_by_user(user_id)
            .await?
            .into_iter()
            .map(|rating| rating.recipe_id)
            .collect();
        recipe_ids.sort();
        recipe_ids.dedup();

        let mut removed = 0;
        for recipe_id in recipe_ids {
            let _guard = self.locks.lock(recipe_id).await;

            if let Some(rating) = self.ratings.find_user_rating(user_id, &recipe_id).await? {
                if let Some(rating_id) = rating.id {
                    if self.ratings.delete_rating(&rating_id).await? {
                        removed += 1;
                    }
                }
            }

            if let Some(mut recipe) = self.recipes.find_recipe(&recipe_id).await? {
                self.recompute_locked(&mut recipe).await?;
            }
        }

        log::info!("사용자 {}의 평점 {}건 삭제", user_id, removed);
        Ok(removed)
    }

    /// 레시피 잠금을 이미 보유한 상태에서 호출해야 합니다.
    async fn recompute_locked(&self, recipe: &mut Recipe) -> AppResult<f64> {
        let recipe_id = recipe
            .id
            .ok_or_else(|| AppError::InternalError("ID 없는 레시피는 재계산할 수 없습니다".to_string()))?;

        let ratings = self.ratings.list_ratings(&recipe_id).await?;
        let average_rating = rounded_average(ratings.iter().map(|rating| rating.rating));

        recipe.set_average_rating(average_rating);
        self.recipes.save_recipe(recipe).await?;

        Ok(average_rating)
    }

    async fn require_profile(&self, user_id: &ObjectId) -> AppResult<()> {
        self.profiles
            .find_profile(user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("사용자 프로필을 찾을 수 없습니다".to_string()))
    }

    async fn require_recipe(&self, recipe_id: &ObjectId) -> AppResult<Recipe> {
        self.recipes
            .find_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound("레시피를 찾을 수 없습니다".to_string()))
    }

    async fn require_rating(&self, rating_id: &ObjectId) -> AppResult<UserRating> {
        self.ratings
            .find_rating(rating_id)
            .await?
            .ok_or_else(|| AppError::NotFound("평점을 찾을 수 없습니다".to_string()))
    }
}
