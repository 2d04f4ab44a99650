//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 입력 문자열 정리, ObjectId 파싱
//! - [`display_terminal`] - 초기화 과정 터미널 출력
//!
//! ```rust,ignore
//! use crate::utils::string_utils::parse_object_id;
//!
//! let recipe_id = parse_object_id(&path, "recipe_id")?;
//! ```

pub mod string_utils;
pub mod display_terminal;
