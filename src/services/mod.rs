//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 `#[service]`로 선언되며 저장소 트레이트를 `StoreHandle<dyn ...Store>` 필드로 받습니다.
//! 운영 환경에서는 `instance()`가 MongoDB 리포지토리를 주입한 싱글톤을 돌려주고,
//! 테스트는 `with_stores`로 메모리 저장소를 넣습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::ratings::RatingService;
//!
//! let rating_service = RatingService::instance();
//! let change = rating_service.upsert_rating(request).await?;
//! println!("새 평균: {}", change.average_rating);
//! ```

pub mod recipe_locks;
pub mod recipes;
pub mod ratings;
pub mod ingredients;
pub mod categories;
pub mod users;
