//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 리포지토리는 [`stores`]의 저장소 trait를 MongoDB 컬렉션 위에 구현하고,
//! `#[repository]` 매크로를 사용하여 싱글톤으로 관리됩니다.
//!
//! ```rust,ignore
//! use crate::repositories::recipes::RecipeRepository;
//! use crate::repositories::stores::RecipeStore;
//!
//! let recipe = RecipeRepository::instance().find_recipe(&recipe_id).await?;
//! ```

pub mod stores;
pub mod users;
pub mod recipes;
pub mod ingredients;
pub mod categories;
pub mod ratings;

#[cfg(test)]
pub mod memory;

pub use stores::*;

use crate::core::errors::AppResult;

/// 모든 컬렉션의 인덱스를 생성합니다.
///
/// 유니크 인덱스(재료/카테고리 이름, 프로필 `user_id`, 평점 `(user_id, recipe_id)`)가
/// 동시 요청 사이의 중복 삽입을 막으므로, 요청을 받기 전에 한 번 호출해야 합니다.
/// `ServiceLocator::initialize_all()` 이후에 호출합니다.
pub async fn create_indexes() -> AppResult<()> {
    recipes::RecipeRepository::instance().create_indexes().await?;
    recipes::RecipeIngredientRepository::instance().create_indexes().await?;
    recipes::RecipeImageRepository::instance().create_indexes().await?;
    ratings::RatingRepository::instance().create_indexes().await?;
    ingredients::IngredientRepository::instance().create_indexes().await?;
    categories::CategoryRepository::instance().create_indexes().await?;
    users::UserProfileRepository::instance().create_indexes().await?;

    log::info!("✅ MongoDB 인덱스 생성 완료");
    Ok(())
}
