//! 도메인 계층: 저장 엔티티와 HTTP 요청/응답 DTO

pub mod entities;
pub mod dto;

pub use entities::*;
