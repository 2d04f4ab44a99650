pub mod user_rating;

pub use user_rating::*;
