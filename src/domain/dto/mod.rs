//! HTTP 요청/응답 DTO
//!
//! 요청 DTO는 `validator`로 형식을 검사하고, 응답 DTO는 엔티티의 `ObjectId`를
//! 24자리 16진수 문자열로 바꿔 내보냅니다.

pub mod users;
pub mod recipes;
pub mod ingredients;
pub mod categories;
pub mod ratings;
