//! # Recipe Service
//!
//! 레시피 CRUD와 삭제 시 종속 데이터(재료 행, 이미지, 평점) 정리를 담당합니다.
//! `average_rating`은 여기서 쓰지 않고 [`RatingService`](crate::services::ratings::RatingService)만 갱신합니다.

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::recipes::{
            RecipeDetailResponse, RecipeImageResponse, RecipeIngredientResponse, RecipeRequest, RecipeResponse,
        },
        entities::{Recipe, RecipeDetails},
    },
    repositories::stores::{
        CategoryStore, IngredientStore, RatingStore, RecipeImageStore, RecipeIngredientStore, RecipeStore, StoreHandle,
    },
    services::recipe_locks::RecipeLocks,
    utils::string_utils::{clean_optional_string, parse_object_id, validate_required_string},
};

/// 레시피 서비스가 사용하는 저장소 묶음
///
/// `Default`는 각 핸들을 MongoDB 리포지토리로 채웁니다.
#[derive(Clone, Default)]
pub struct RecipeStores {
    pub recipes: StoreHandle<dyn RecipeStore>,
    pub categories: StoreHandle<dyn CategoryStore>,
    pub ingredients: StoreHandle<dyn IngredientStore>,
    pub recipe_ingredients: StoreHandle<dyn RecipeIngredientStore>,
    pub images: StoreHandle<dyn RecipeImageStore>,
    pub ratings: StoreHandle<dyn RatingStore>,
}

/// 레시피 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리됩니다. `stores`는
/// [`RecipeStores::default`]로, `locks`는 `ServiceLocator`에 등록된 공유
/// [`RecipeLocks`]로 채워집니다.
///
/// # 예제
///
/// ```rust,ignore
/// let service = RecipeService::instance();
/// let detail = service.get_recipe(&recipe_id.to_hex()).await?;
///
/// println!("{}: 평균 {} ({}건)", detail.recipe.title, detail.recipe.average_rating, detail.total_ratings);
/// ```
#[service(name = "recipe")]
pub struct RecipeService {
    stores: RecipeStores,
    locks: Arc<RecipeLocks>,
}

impl RecipeService {
    /// 저장소 묶음과 잠금 테이블을 직접 지정해 생성합니다.
    pub fn with_stores(stores: RecipeStores, locks: Arc<RecipeLocks>) -> Self {
        Self { stores, locks }
    }

    /// 새 레시피 생성
    ///
    /// 새 레시피의 `average_rating`은 `0.0`에서 시작합니다.
    ///
    /// # 인자
    ///
    /// * `request` - 제목, 설명, 조리 단계, 시간, 카테고리 ID 목록, 영상 URL
    ///
    /// # 반환값
    ///
    /// * `Ok(RecipeResponse)` - 생성된 레시피
    /// * `Err(AppError::ValidationError)` - 빈 제목 또는 존재하지 않는 카테고리
    pub async fn create_recipe(&self, request: RecipeRequest) -> AppResult<RecipeResponse> {
        let details = self.details_from(request).await?;
        let recipe = self.stores.recipes.insert_recipe(Recipe::new(details)).await?;

        log::info!("레시피 생성: {} ({:?})", recipe.title, recipe.id);
        Ok(RecipeResponse::from(recipe))
    }

    /// 평점 수, 재료 행, 이미지를 포함한 상세 정보를 반환합니다.
    ///
    /// 재료 행이 마스터 재료를 참조하면 그 이름을 한 번씩만 조회해 붙입니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(RecipeDetailResponse)` - 레시피, `total_ratings`, 재료 행, 이미지
    /// * `Err(AppError::NotFound)` - 레시피가 없음
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId
    pub async fn get_recipe(&self, id: &str) -> AppResult<RecipeDetailResponse> {
        let recipe_id = parse_object_id(id, "recipe id")?;
        let recipe = self.require_recipe(&recipe_id).await?;

        let total_ratings = self.stores.ratings.list_ratings(&recipe_id).await?.len() as u64;
        let rows = self.stores.recipe_ingredients.list_recipe_ingredients(Some(&recipe_id)).await?;

        let mut names: HashMap<ObjectId, String> = HashMap::new();
        for ingredient_id in rows.iter().filter_map(|row| row.ingredient_id) {
            if names.contains_key(&ingredient_id) {
                continue;
            }
            if let Some(ingredient) = self.stores.ingredients.find_ingredient(&ingredient_id).await? {
                names.insert(ingredient_id, ingredient.name);
            }
        }

        let ingredients = rows
            .into_iter()
            .map(|row| {
                let name = row.ingredient_id.and_then(|id| names.get(&id)).map(String::as_str);
                RecipeIngredientResponse::new(row, name)
            })
            .collect();

        let images = self.stores.images
            .list_images(Some(&recipe_id))
            .await?
            .into_iter()
            .map(RecipeImageResponse::from)
            .collect();

        Ok(RecipeDetailResponse {
            recipe: RecipeResponse::from(recipe),
            total_ratings,
            ingredients,
            images,
        })
    }

    pub async fn list_recipes(&self) -> AppResult<Vec<RecipeResponse>> {
        let recipes = self.stores.recipes.list_recipes().await?;
        Ok(recipes.into_iter().map(RecipeResponse::from).collect())
    }

    /// 편집 가능한 필드를 전체 교체합니다. 평균 평점은 유지됩니다.
    pub async fn update_recipe(&self, id: &str, request: RecipeRequest) -> AppResult<RecipeResponse> {
        let recipe_id = parse_object_id(id, "recipe id")?;
        let details = self.details_from(request).await?;

        let _guard = self.locks.lock(recipe_id).await;

        let mut recipe = self.require_recipe(&recipe_id).await?;
        recipe.apply_details(details);
        self.stores.recipes.save_recipe(&recipe).await?;

        log::info!("레시피 수정: {}", recipe_id);
        Ok(RecipeResponse::from(recipe))
    }

    /// 레시피와 재료 행, 이미지, 평점을 함께 삭제합니다.
    ///
    /// 레시피 잠금 안에서 하위 문서를 먼저 지우고 마지막에 레시피를 지웁니다.
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// RecipeService::instance().delete_recipe(&recipe_id).await?;
    /// ```
    pub async fn delete_recipe(&self, id: &str) -> AppResult<()> {
        let recipe_id = parse_object_id(id, "recipe id")?;

        let _guard = self.locks.lock(recipe_id).await;
        self.require_recipe(&recipe_id).await?;

        let rows = self.stores.recipe_ingredients.delete_for_recipe(&recipe_id).await?;
        let images = self.stores.images.delete_images_for_recipe(&recipe_id).await?;
        let ratings = self.stores.ratings.delete_ratings_for_recipe(&recipe_id).await?;

        if !self.stores.recipes.delete_recipe(&recipe_id).await? {
            return Err(AppError::NotFound("레시피를 찾을 수 없습니다".to_string()));
        }

        log::info!(
            "레시피 삭제: {} (재료 행 {}건, 이미지 {}건, 평점 {}건)",
            recipe_id, rows, images, ratings
        );
        Ok(())
    }

    async fn details_from(&self, request: RecipeRequest) -> AppResult<RecipeDetails> {
        let title = validate_required_string(&request.title, "title")?;

        let mut category_ids = Vec::with_capacity(request.category_ids.len());
        for raw in &request.category_ids {
            let category_id = parse_object_id(raw, "category_id")?;
            if self.stores.categories.find_category(&category_id).await?.is_none() {
                return Err(AppError::ValidationError(format!("존재하지 않는 카테고리입니다: {}", raw)));
            }
            category_ids.push(category_id);
        }

        Ok(RecipeDetails {
            title,
            description: clean_optional_string(request.description),
            instructions: request.instructions.filter(|value| !value.is_null()),
            preparation_time: request.preparation_time,
            cooking_time: request.cooking_time,
            category_ids,
            youtube_url: clean_optional_string(request.youtube_url),
        })
    }

    async fn require_recipe(&self, recipe_id: &ObjectId) -> AppResult<Recipe> {
        self.stores.recipes
            .find_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound("레시피를 찾을 수 없습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use bigdecimal::BigDecimal;
    use crate::domain::entities::{Ingredient, MealCategory, RecipeImage, RecipeIngredient, Unit, UserRating};
    use crate::repositories::memory::MemoryCatalog;

    fn service(store: &Arc<MemoryCatalog>) -> RecipeService {
        RecipeService::with_stores(
            RecipeStores {
                recipes: StoreHandle::from(store.clone() as Arc<dyn RecipeStore>),
                categories: StoreHandle::from(store.clone() as Arc<dyn CategoryStore>),
                ingredients: StoreHandle::from(store.clone() as Arc<dyn IngredientStore>),
                recipe_ingredients: StoreHandle::from(store.clone() as Arc<dyn RecipeIngredientStore>),
                images: StoreHandle::from(store.clone() as Arc<dyn RecipeImageStore>),
                ratings: StoreHandle::from(store.clone() as Arc<dyn RatingStore>),
            },
            Arc::new(RecipeLocks::new()),
        )
    }

    fn request(title: &str) -> RecipeRequest {
        RecipeRequest {
            title: title.to_string(),
            description: None,
            instructions: None,
            preparation_time: Some(900),
            cooking_time: Some(3600),
            category_ids: Vec::new(),
            youtube_url: None,
        }
    }

    #[actix_web::test]
    async fn test_create_recipe_starts_with_zero_average() {
        let store = MemoryCatalog::new();
        let created = service(&store).create_recipe(request("Pörkölt")).await.unwrap();

        assert_eq!(created.average_rating, 0.0);
        assert_eq!(created.total_time, Some(4500));
    }

    #[actix_web::test]
    async fn test_unknown_category_is_rejected() {
        let store = MemoryCatalog::new();
        let mut req = request("Pörkölt");
        req.category_ids = vec![ObjectId::new().to_hex()];

        let result = service(&store).create_recipe(req).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_update_keeps_average_rating() {
        let store = MemoryCatalog::new();
        let service = service(&store);
        let created = service.create_recipe(request("Lecsó")).await.unwrap();

        let recipe_id = ObjectId::from_str(&created.id).unwrap();
        let mut stored = store.find_recipe(&recipe_id).await.unwrap().unwrap();
        stored.set_average_rating(3.67);
        store.save_recipe(&stored).await.unwrap();

        let dinner = store.insert_category(MealCategory::new("Vacsora".to_string())).await.unwrap();
        let mut update = request("Kolbászos lecsó");
        update.category_ids = vec![dinner.id.unwrap().to_hex()];

        let updated = service.update_recipe(&created.id, update).await.unwrap();

        assert_eq!(updated.title, "Kolbászos lecsó");
        assert_eq!(updated.average_rating, 3.67);
        assert_eq!(updated.category_ids, vec![dinner.id.unwrap().to_hex()]);
    }

    #[actix_web::test]
    async fn test_detail_includes_rows_images_and_rating_count() {
        let store = MemoryCatalog::new();
        let service = service(&store);
        let created = service.create_recipe(request("Palacsinta")).await.unwrap();
        let recipe_id = ObjectId::from_str(&created.id).unwrap();

        let flour = store.insert_ingredient(Ingredient::new("liszt".to_string())).await.unwrap();
        store
            .insert_recipe_ingredient(
                RecipeIngredient::new(recipe_id, flour.id, None, BigDecimal::from_str("250").unwrap(), Unit::G, None).unwrap(),
            )
            .await
            .unwrap();
        store.insert_image(RecipeImage::new(recipe_id, "palacsinta.jpg").unwrap()).await.unwrap();
        store.save_rating(UserRating::new(ObjectId::new(), recipe_id, 5).unwrap()).await.unwrap();

        let detail = service.get_recipe(&created.id).await.unwrap();

        assert_eq!(detail.total_ratings, 1);
        assert_eq!(detail.ingredients.len(), 1);
        assert_eq!(detail.ingredients[0].display, "250.00 Gram liszt");
        assert_eq!(detail.images[0].image, "recipe_images/palacsinta.jpg");
    }

    #[actix_web::test]
    async fn test_delete_recipe_cascades() {
        let store = MemoryCatalog::new();
        let service = service(&store);
        let doomed = service.create_recipe(request("Rakott krumpli")).await.unwrap();
        let kept = service.create_recipe(request("Túrós csusza")).await.unwrap();
        let doomed_id = ObjectId::from_str(&doomed.id).unwrap();
        let kept_id = ObjectId::from_str(&kept.id).unwrap();

        for recipe_id in [doomed_id, kept_id] {
            store
                .insert_recipe_ingredient(
                    RecipeIngredient::new(recipe_id, None, Some("krumpli".to_string()), BigDecimal::from(1), Unit::Kg, None).unwrap(),
                )
                .await
                .unwrap();
            store.insert_image(RecipeImage::new(recipe_id, "foto.jpg").unwrap()).await.unwrap();
            store.save_rating(UserRating::new(ObjectId::new(), recipe_id, 4).unwrap()).await.unwrap();
        }

        service.delete_recipe(&doomed.id).await.unwrap();

        assert!(store.find_recipe(&doomed_id).await.unwrap().is_none());
        assert!(store.list_recipe_ingredients(Some(&doomed_id)).await.unwrap().is_empty());
        assert!(store.list_images(Some(&doomed_id)).await.unwrap().is_empty());
        assert!(store.list_ratings(&doomed_id).await.unwrap().is_empty());

        assert_eq!(store.list_recipe_ingredients(Some(&kept_id)).await.unwrap().len(), 1);
        assert_eq!(store.list_images(Some(&kept_id)).await.unwrap().len(), 1);
        assert_eq!(store.list_ratings(&kept_id).await.unwrap().len(), 1);

        let again = service.delete_recipe(&doomed.id).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_invalid_id_is_validation_error() {
        let store = MemoryCatalog::new();
        let result = service(&store).get_recipe("nope").await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
