//! # Recipe DTOs
//!
//! 레시피, 레시피 재료 행, 레시피 이미지, 단위 목록의 요청/응답 구조체입니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
