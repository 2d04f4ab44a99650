//! 평점 집계 서비스
//!
//! 평점 등록/수정/삭제와 레시피 평균 평점 재계산을 한곳에서 처리합니다.

pub mod rating_service;

pub use rating_service::RatingService;
