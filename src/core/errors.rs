//! # Application Error Handling System
//!
//! 레시피 카탈로그 백엔드의 통합 에러 처리 시스템입니다.
//! `thiserror`로 에러 타입을 정의하고 `actix_web::ResponseError`를 구현하여
//! 서비스 계층의 에러가 그대로 일관된 JSON 응답으로 변환되도록 합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 평점 범위 위반, 필수 필드 누락 |
//! | `NotFound` | 404 Not Found | 레시피/재료/평점 없음 |
//! | `ConflictError` | 409 Conflict | 재료/카테고리 이름 중복 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `RedisError` | 500 Internal Server Error | 캐시 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn upsert(&self, rating: i32) -> Result<UserRating, AppError> {
//!     if !(0..=5).contains(&rating) {
//!         return Err(AppError::ValidationError(
//!             "평점은 0에서 5 사이여야 합니다".to_string()
//!         ));
//!     }
//!     // ...
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 모든 계층(리포지토리, 서비스, 핸들러)이 공유하는 에러 열거형입니다.
/// 외부 라이브러리 에러는 `map_err`로 문자열 메시지를 담아 변환합니다.
///
/// ```rust,ignore
/// collection.find_one(doc! { "_id": id }).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    ///
    /// MongoDB 연결 실패, 쿼리 실행 오류, 직렬화 실패 등을 나타냅니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    ///
    /// 캐시 오류는 보통 로그만 남기고 요청을 실패시키지 않습니다.
    /// 캐시 자체를 다루는 관리 작업에서만 이 에러가 전파됩니다.
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    ///
    /// # 발생 시나리오
    /// - 평점이 0-5 범위를 벗어남
    /// - 레시피 재료에 재료 참조도 수동 이름도 없음
    /// - 수량의 자릿수 초과
    /// - 잘못된 ObjectId 형식
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    ///
    /// 유니크 제약(재료 이름, 카테고리 이름, 프로필의 사용자 식별자)을
    /// 위반할 때 발생합니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러 응답은 `{ "error": "..." }` 형식을 따릅니다.
    /// 5xx 에러는 서버 로그에 함께 기록됩니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            log::error!("{}", self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// MongoDB 에러를 `DatabaseError`로 변환합니다.
///
/// 리포지토리 전반에서 `.map_err(db_error)` 형태로 사용합니다.
pub fn db_error(e: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(e.to_string())
}

/// MongoDB 중복 키 오류 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 쓰기 에러를 변환합니다. 유니크 인덱스 위반은 `ConflictError`가 됩니다.
///
/// ```rust,ignore
/// collection.insert_one(&ingredient).await
///     .map_err(|e| write_error(e, "이미 존재하는 재료입니다"))?;
/// ```
pub fn write_error(e: mongodb::error::Error, conflict_message: &str) -> AppError {
    use mongodb::error::{ErrorKind, WriteFailure};

    match *e.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == DUPLICATE_KEY_CODE => {
            AppError::ConflictError(conflict_message.to_string())
        }
        _ => db_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("평점은 0에서 5 사이여야 합니다".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Recipe not found".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("Ingredient already exists".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_database_error_response() {
        let error = AppError::DatabaseError("connection reset".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
