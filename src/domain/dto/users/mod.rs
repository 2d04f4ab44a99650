//! # User Profile DTOs
//!
//! `/api/v1/users` 엔드포인트의 요청/응답 구조체입니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
