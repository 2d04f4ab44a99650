//! 사용자 프로필 서비스 모듈
//!
//! 프로필 삭제 시 해당 사용자의 평점을 지우고 영향받은 레시피의 평균을 다시 계산합니다.

pub mod user_profile_service;

pub use user_profile_service::UserProfileService;
