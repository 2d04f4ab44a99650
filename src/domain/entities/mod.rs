//! MongoDB에 저장되는 도메인 엔티티

pub mod users;
pub mod recipes;
pub mod ingredients;
pub mod categories;
pub mod ratings;

pub use users::*;
pub use recipes::*;
pub use ingredients::*;
pub use categories::*;
pub use ratings::*;
