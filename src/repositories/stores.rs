//! # 저장소 계약 (Store Traits)
//!
//! 서비스 계층이 의존하는 영속성 인터페이스입니다.
//! 운영 환경에서는 MongoDB 리포지토리가, 단위 테스트에서는 메모리 구현이 주입됩니다.
//!
//! ```text
//! RatingService ──► RatingStore  ◄── RatingRepository (MongoDB)
//!              └──► RecipeStore  ◄── RecipeRepository (MongoDB + Redis)
//! ```
//!
//! 서비스는 저장소를 [`StoreHandle`]로 보유합니다. `#[service]` 매크로는 `Arc<T>`가
//! 아닌 필드를 `Default::default()`로 채우므로, 핸들의 `Default`가 `ServiceLocator`에서
//! 해당 MongoDB 리포지토리를 꺼내 옵니다.
//!
//! ```rust,ignore
//! // 운영: #[service]가 생성한 new()에서
//! let ratings: StoreHandle<dyn RatingStore> = StoreHandle::default();
//!
//! // 테스트: 메모리 구현 주입
//! let store = MemoryCatalog::new();
//! let ratings: StoreHandle<dyn RatingStore> = StoreHandle::from(store.clone() as Arc<dyn RatingStore>);
//! ```

use std::ops::Deref;
use std::sync::Arc;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::AppResult;
use crate::core::registry::ServiceLocator;
use crate::domain::entities::{
    Ingredient, MealCategory, Recipe, RecipeImage, RecipeIngredient, UserProfile, UserRating,
};
use crate::repositories::{
    categories::CategoryRepository,
    ingredients::IngredientRepository,
    ratings::RatingRepository,
    recipes::{RecipeImageRepository, RecipeIngredientRepository, RecipeRepository},
    users::UserProfileRepository,
};

/// 저장소 trait 객체에 대한 공유 핸들
pub struct StoreHandle<S: ?Sized>(Arc<S>);

impl<S: ?Sized> Deref for StoreHandle<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.0
    }
}

impl<S: ?Sized> Clone for StoreHandle<S> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<S: ?Sized> From<Arc<S>> for StoreHandle<S> {
    fn from(store: Arc<S>) -> Self {
        Self(store)
    }
}

impl Default for StoreHandle<dyn RecipeStore> {
    fn default() -> Self {
        Self(ServiceLocator::get::<RecipeRepository>())
    }
}

impl Default for StoreHandle<dyn RatingStore> {
    fn default() -> Self {
        Self(ServiceLocator::get::<RatingRepository>())
    }
}

impl Default for StoreHandle<dyn IngredientStore> {
    fn default() -> Self {
        Self(ServiceLocator::get::<IngredientRepository>())
    }
}

impl Default for StoreHandle<dyn CategoryStore> {
    fn default() -> Self {
        Self(ServiceLocator::get::<CategoryRepository>())
    }
}

impl Default for StoreHandle<dyn RecipeIngredientStore> {
    fn default() -> Self {
        Self(ServiceLocator::get::<RecipeIngredientRepository>())
    }
}

impl Default for StoreHandle<dyn RecipeImageStore> {
    fn default() -> Self {
        Self(ServiceLocator::get::<RecipeImageRepository>())
    }
}

impl Default for StoreHandle<dyn UserProfileStore> {
    fn default() -> Self {
        Self(ServiceLocator::get::<UserProfileRepository>())
    }
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// 새 레시피를 저장하고 ID가 채워진 레시피를 반환합니다.
    async fn insert_recipe(&self, recipe: Recipe) -> AppResult<Recipe>;

    async fn find_recipe(&self, id: &ObjectId) -> AppResult<Option<Recipe>>;

    async fn list_recipes(&self) -> AppResult<Vec<Recipe>>;

    /// `average_rating`을 포함한 모든 필드를 덮어씁니다.
    async fn save_recipe(&self, recipe: &Recipe) -> AppResult<()>;

    async fn delete_recipe(&self, id: &ObjectId) -> AppResult<bool>;

    /// 모든 레시피의 `category_ids`에서 카테고리를 제거하고 수정된 레시피 수를 반환합니다.
    async fn remove_category(&self, category_id: &ObjectId) -> AppResult<u64>;
}

#[async_trait]
pub trait RatingStore: Send + Sync {
    /// 한 레시피의 모든 평점
    async fn list_ratings(&self, recipe_id: &ObjectId) -> AppResult<Vec<UserRating>>;

    async fn list_ratings_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<UserRating>>;

    async fn list_all_ratings(&self) -> AppResult<Vec<UserRating>>;

    async fn find_rating(&self, id: &ObjectId) -> AppResult<Option<UserRating>>;

    /// (user, recipe) 쌍의 평점
    async fn find_user_rating(&self, user_id: &ObjectId, recipe_id: &ObjectId) -> AppResult<Option<UserRating>>;

    /// ID가 없으면 삽입, 있으면 교체합니다.
    async fn save_rating(&self, rating: UserRating) -> AppResult<UserRating>;

    async fn delete_rating(&self, id: &ObjectId) -> AppResult<bool>;

    async fn delete_ratings_for_recipe(&self, recipe_id: &ObjectId) -> AppResult<u64>;
}

#[async_trait]
pub trait IngredientStore: Send + Sync {
    async fn insert_ingredient(&self, ingredient: Ingredient) -> AppResult<Ingredient>;
    async fn find_ingredient(&self, id: &ObjectId) -> AppResult<Option<Ingredient>>;
    async fn find_ingredient_by_name(&self, name: &str) -> AppResult<Option<Ingredient>>;
    async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>>;
    async fn save_ingredient(&self, ingredient: &Ingredient) -> AppResult<()>;
    async fn delete_ingredient(&self, id: &ObjectId) -> AppResult<bool>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert_category(&self, category: MealCategory) -> AppResult<MealCategory>;
    async fn find_category(&self, id: &ObjectId) -> AppResult<Option<MealCategory>>;
    async fn find_category_by_name(&self, name: &str) -> AppResult<Option<MealCategory>>;
    async fn list_categories(&self) -> AppResult<Vec<MealCategory>>;
    async fn save_category(&self, category: &MealCategory) -> AppResult<()>;
    async fn delete_category(&self, id: &ObjectId) -> AppResult<bool>;
}

#[async_trait]
pub trait RecipeIngredientStore: Send + Sync {
    async fn insert_recipe_ingredient(&self, row: RecipeIngredient) -> AppResult<RecipeIngredient>;
    async fn find_recipe_ingredient(&self, id: &ObjectId) -> AppResult<Option<RecipeIngredient>>;

    /// `recipe_id`가 주어지면 해당 레시피의 행만 반환합니다.
    async fn list_recipe_ingredients(&self, recipe_id: Option<&ObjectId>) -> AppResult<Vec<RecipeIngredient>>;

    async fn save_recipe_ingredient(&self, row: &RecipeIngredient) -> AppResult<()>;
    async fn delete_recipe_ingredient(&self, id: &ObjectId) -> AppResult<bool>;
    async fn delete_for_recipe(&self, recipe_id: &ObjectId) -> AppResult<u64>;
    async fn delete_for_ingredient(&self, ingredient_id: &ObjectId) -> AppResult<u64>;
}

#[async_trait]
pub trait RecipeImageStore: Send + Sync {
    async fn insert_image(&self, image: RecipeImage) -> AppResult<RecipeImage>;
    async fn find_image(&self, id: &ObjectId) -> AppResult<Option<RecipeImage>>;
    async fn list_images(&self, recipe_id: Option<&ObjectId>) -> AppResult<Vec<RecipeImage>>;
    async fn delete_image(&self, id: &ObjectId) -> AppResult<bool>;
    async fn delete_images_for_recipe(&self, recipe_id: &ObjectId) -> AppResult<u64>;
}

#[async_trait]
pub trait UserProfileStore: Send + Sync {
    async fn insert_profile(&self, profile: UserProfile) -> AppResult<UserProfile>;
    async fn find_profile(&self, id: &ObjectId) -> AppResult<Option<UserProfile>>;
    async fn find_profile_by_user_id(&self, user_id: &str) -> AppResult<Option<UserProfile>>;
    async fn list_profiles(&self) -> AppResult<Vec<UserProfile>>;
    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()>;
    async fn delete_profile(&self, id: &ObjectId) -> AppResult<bool>;
}
