//! 레시피, 레시피 재료 행, 레시피 이미지 서비스

pub mod recipe_service;
pub mod recipe_ingredient_service;
pub mod recipe_image_service;

pub use recipe_service::{RecipeService, RecipeStores};
pub use recipe_ingredient_service::RecipeIngredientService;
pub use recipe_image_service::RecipeImageService;
