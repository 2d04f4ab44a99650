//! 레시피와 레시피에 종속된 재료 행, 이미지 리포지토리

pub mod recipe_repo;
pub mod recipe_ingredient_repo;
pub mod recipe_image_repo;

pub use recipe_repo::RecipeRepository;
pub use recipe_ingredient_repo::RecipeIngredientRepository;
pub use recipe_image_repo::RecipeImageRepository;
