//! 레시피와 레시피에 딸린 재료 행, 이미지, 계량 단위

pub mod recipe;
pub mod recipe_ingredient;
pub mod recipe_image;
pub mod unit;

pub use recipe::*;
pub use recipe_ingredient::*;
pub use recipe_image::*;
pub use unit::*;
