pub mod ingredient_repo;

pub use ingredient_repo::IngredientRepository;
