//! 서비스 단위 테스트용 메모리 저장소
//!
//! 모든 저장소 trait를 하나의 구조체에서 구현하며, MongoDB 유니크 인덱스와
//! 같은 제약(재료/카테고리 이름, 프로필 `user_id`, 사용자별 레시피 평점)을 흉내 냅니다.

use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{
    Ingredient, MealCategory, Recipe, RecipeImage, RecipeIngredient, UserProfile, UserRating,
};
use super::stores::*;

#[derive(Default)]
pub struct MemoryCatalog {
    recipes: Mutex<Vec<Recipe>>,
    ratings: Mutex<Vec<UserRating>>,
    ingredients: Mutex<Vec<Ingredient>>,
    categories: Mutex<Vec<MealCategory>>,
    recipe_ingredients: Mutex<Vec<RecipeIngredient>>,
    images: Mutex<Vec<RecipeImage>>,
    profiles: Mutex<Vec<UserProfile>>,
}

impl MemoryCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn replace_by_id<T: Clone>(items: &mut [T], id: Option<ObjectId>, item: &T, id_of: fn(&T) -> Option<ObjectId>) -> AppResult<()> {
    let id = id.ok_or_else(|| AppError::InternalError("missing id".to_string()))?;
    if let Some(slot) = items.iter_mut().find(|existing| id_of(existing) == Some(id)) {
        *slot = item.clone();
    }
    Ok(())
}

fn remove_where<T>(items: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> u64 {
    let before = items.len();
    items.retain(|item| !predicate(item));
    (before - items.len()) as u64
}

#[async_trait]
impl RecipeStore for MemoryCatalog {
    async fn insert_recipe(&self, mut recipe: Recipe) -> AppResult<Recipe> {
        recipe.id = Some(ObjectId::new());
        lock(&self.recipes).push(recipe.clone());
        Ok(recipe)
    }

    async fn find_recipe(&self, id: &ObjectId) -> AppResult<Option<Recipe>> {
        Ok(lock(&self.recipes).iter().find(|r| r.id == Some(*id)).cloned())
    }

    async fn list_recipes(&self) -> AppResult<Vec<Recipe>> {
        Ok(lock(&self.recipes).clone())
    }

    async fn save_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        replace_by_id(&mut lock(&self.recipes), recipe.id, recipe, |r| r.id)
    }

    async fn delete_recipe(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(remove_where(&mut lock(&self.recipes), |r| r.id == Some(*id)) > 0)
    }

    async fn remove_category(&self, category_id: &ObjectId) -> AppResult<u64> {
        let mut modified = 0;
        for recipe in lock(&self.recipes).iter_mut() {
            let before = recipe.category_ids.len();
            recipe.category_ids.retain(|id| id != category_id);
            if recipe.category_ids.len() != before {
                modified += 1;
            }
        }
        Ok(modified)
    }
}

#[async_trait]
impl RatingStore for MemoryCatalog {
    async fn list_ratings(&self, recipe_id: &ObjectId) -> AppResult<Vec<UserRating>> {
        Ok(lock(&self.ratings).iter().filter(|r| r.recipe_id == *recipe_id).cloned().collect())
    }

    async fn list_ratings_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<UserRating>> {
        Ok(lock(&self.ratings).iter().filter(|r| r.user_id == *user_id).cloned().collect())
    }

    async fn list_all_ratings(&self) -> AppResult<Vec<UserRating>> {
        Ok(lock(&self.ratings).clone())
    }

    async fn find_rating(&self, id: &ObjectId) -> AppResult<Option<UserRating>> {
        Ok(lock(&self.ratings).iter().find(|r| r.id == Some(*id)).cloned())
    }

    async fn find_user_rating(&self, user_id: &ObjectId, recipe_id: &ObjectId) -> AppResult<Option<UserRating>> {
        Ok(lock(&self.ratings)
            .iter()
            .find(|r| r.user_id == *user_id && r.recipe_id == *recipe_id)
            .cloned())
    }

    async fn save_rating(&self, mut rating: UserRating) -> AppResult<UserRating> {
        let mut ratings = lock(&self.ratings);

        let duplicate = ratings.iter().any(|r| {
            r.user_id == rating.user_id && r.recipe_id == rating.recipe_id && r.id != rating.id
        });
        if duplicate {
            return Err(AppError::ConflictError("duplicate user rating".to_string()));
        }

        match rating.id {
            Some(_) => replace_by_id(&mut ratings, rating.id, &rating, |r| r.id)?,
            None => {
                rating.id = Some(ObjectId::new());
                ratings.push(rating.clone());
            }
        }
        Ok(rating)
    }

    async fn delete_rating(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(remove_where(&mut lock(&self.ratings), |r| r.id == Some(*id)) > 0)
    }

    async fn delete_ratings_for_recipe(&self, recipe_id: &ObjectId) -> AppResult<u64> {
        Ok(remove_where(&mut lock(&self.ratings), |r| r.recipe_id == *recipe_id))
    }
}

#[async_trait]
impl IngredientStore for MemoryCatalog {
    async fn insert_ingredient(&self, mut ingredient: Ingredient) -> AppResult<Ingredient> {
        let mut ingredients = lock(&self.ingredients);
        if ingredients.iter().any(|i| i.name == ingredient.name) {
            return Err(AppError::ConflictError("duplicate ingredient".to_string()));
        }
        ingredient.id = Some(ObjectId::new());
        ingredients.push(ingredient.clone());
        Ok(ingredient)
    }

    async fn find_ingredient(&self, id: &ObjectId) -> AppResult<Option<Ingredient>> {
        Ok(lock(&self.ingredients).iter().find(|i| i.id == Some(*id)).cloned())
    }

    async fn find_ingredient_by_name(&self, name: &str) -> AppResult<Option<Ingredient>> {
        Ok(lock(&self.ingredients).iter().find(|i| i.name == name).cloned())
    }

    async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        Ok(lock(&self.ingredients).clone())
    }

    async fn save_ingredient(&self, ingredient: &Ingredient) -> AppResult<()> {
        replace_by_id(&mut lock(&self.ingredients), ingredient.id, ingredient, |i| i.id)
    }

    async fn delete_ingredient(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(remove_where(&mut lock(&self.ingredients), |i| i.id == Some(*id)) > 0)
    }
}

#[async_trait]
impl CategoryStore for MemoryCatalog {
    async fn insert_category(&self, mut category: MealCategory) -> AppResult<MealCategory> {
        let mut categories = lock(&self.categories);
        if categories.iter().any(|c| c.name == category.name) {
            return Err(AppError::ConflictError("duplicate category".to_string()));
        }
        category.id = Some(ObjectId::new());
        categories.push(category.clone());
        Ok(category)
    }

    async fn find_category(&self, id: &ObjectId) -> AppResult<Option<MealCategory>> {
        Ok(lock(&self.categories).iter().find(|c| c.id == Some(*id)).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> AppResult<Option<MealCategory>> {
        Ok(lock(&self.categories).iter().find(|c| c.name == name).cloned())
    }

    async fn list_categories(&self) -> AppResult<Vec<MealCategory>> {
        Ok(lock(&self.categories).clone())
    }

    async fn save_category(&self, category: &MealCategory) -> AppResult<()> {
        replace_by_id(&mut lock(&self.categories), category.id, category, |c| c.id)
    }

    async fn delete_category(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(remove_where(&mut lock(&self.categories), |c| c.id == Some(*id)) > 0)
    }
}

#[async_trait]
impl RecipeIngredientStore for MemoryCatalog {
    async fn insert_recipe_ingredient(&self, mut row: RecipeIngredient) -> AppResult<RecipeIngredient> {
        row.id = Some(ObjectId::new());
        lock(&self.recipe_ingredients).push(row.clone());
        Ok(row)
    }

    async fn find_recipe_ingredient(&self, id: &ObjectId) -> AppResult<Option<RecipeIngredient>> {
        Ok(lock(&self.recipe_ingredients).iter().find(|r| r.id == Some(*id)).cloned())
    }

    async fn list_recipe_ingredients(&self, recipe_id: Option<&ObjectId>) -> AppResult<Vec<RecipeIngredient>> {
        Ok(lock(&self.recipe_ingredients)
            .iter()
            .filter(|r| recipe_id.is_none_or(|id| r.recipe_id == *id))
            .cloned()
            .collect())
    }

    async fn save_recipe_ingredient(&self, row: &RecipeIngredient) -> AppResult<()> {
        replace_by_id(&mut lock(&self.recipe_ingredients), row.id, row, |r| r.id)
    }

    async fn delete_recipe_ingredient(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(remove_where(&mut lock(&self.recipe_ingredients), |r| r.id == Some(*id)) > 0)
    }

    async fn delete_for_recipe(&self, recipe_id: &ObjectId) -> AppResult<u64> {
        Ok(remove_where(&mut lock(&self.recipe_ingredients), |r| r.recipe_id == *recipe_id))
    }

    async fn delete_for_ingredient(&self, ingredient_id: &ObjectId) -> AppResult<u64> {
        Ok(remove_where(&mut lock(&self.recipe_ingredients), |r| r.ingredient_id == Some(*ingredient_id)))
    }
}

#[async_trait]
impl RecipeImageStore for MemoryCatalog {
    async fn insert_image(&self, mut image: RecipeImage) -> AppResult<RecipeImage> {
        image.id = Some(ObjectId::new());
        lock(&self.images).push(image.clone());
        Ok(image)
    }

    async fn find_image(&self, id: &ObjectId) -> AppResult<Option<RecipeImage>> {
        Ok(lock(&self.images).iter().find(|i| i.id == Some(*id)).cloned())
    }

    async fn list_images(&self, recipe_id: Option<&ObjectId>) -> AppResult<Vec<RecipeImage>> {
        Ok(lock(&self.images)
            .iter()
            .filter(|i| recipe_id.is_none_or(|id| i.recipe_id == *id))
            .cloned()
            .collect())
    }

    async fn delete_image(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(remove_where(&mut lock(&self.images), |i| i.id == Some(*id)) > 0)
    }

    async fn delete_images_for_recipe(&self, recipe_id: &ObjectId) -> AppResult<u64> {
        Ok(remove_where(&mut lock(&self.images), |i| i.recipe_id == *recipe_id))
    }
}

#[async_trait]
impl UserProfileStore for MemoryCatalog {
    async fn insert_profile(&self, mut profile: UserProfile) -> AppResult<UserProfile> {
        let mut profiles = lock(&self.profiles);
        if profiles.iter().any(|p| p.user_id == profile.user_id) {
            return Err(AppError::ConflictError("duplicate profile".to_string()));
        }
        profile.id = Some(ObjectId::new());
        profiles.push(profile.clone());
        Ok(profile)
    }

    async fn find_profile(&self, id: &ObjectId) -> AppResult<Option<UserProfile>> {
        Ok(lock(&self.profiles).iter().find(|p| p.id == Some(*id)).cloned())
    }

    async fn find_profile_by_user_id(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        Ok(lock(&self.profiles).iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn list_profiles(&self) -> AppResult<Vec<UserProfile>> {
        Ok(lock(&self.profiles).clone())
    }

    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        replace_by_id(&mut lock(&self.profiles), profile.id, profile, |p| p.id)
    }

    async fn delete_profile(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(remove_where(&mut lock(&self.profiles), |p| p.id == Some(*id)) > 0)
    }
}
