pub mod meal_category;

pub use meal_category::*;
