//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 각 핸들러는 요청 DTO를 검증한 뒤 `web::Data`로 주입된 서비스에 위임하고,
//! 실패는 `AppError`의 `ResponseError` 구현을 통해 HTTP 상태 코드로 변환됩니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Admin UI, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직, 평점 집계              ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - MongoDB + Redis 캐시            ← Repository Layer
//! ├─────────────────────────────────────────────┤
//!   Entities - 도메인 모델                         ← Domain Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 핸들러 패턴
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn create_recipe(
//!     payload: web::Json<RecipeRequest>,
//!     service: web::Data<RecipeService>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()
//!         .map_err(|e| AppError::ValidationError(e.to_string()))?;
//!
//!     let response = service.create_recipe(payload.into_inner()).await?;
//!
//!     Ok(HttpResponse::Created().json(response))
//! }
//! ```
//!
//! 운영에서는 `routes::configure_all_routes`가 `XService::instance()`를 앱 데이터로 등록하고,
//! 테스트에서는 메모리 저장소로 만든 서비스를 `App::app_data`에 직접 넣습니다.

pub mod users;
pub mod categories;
pub mod ingredients;
pub mod recipes;
pub mod recipe_ingredients;
pub mod recipe_images;
pub mod ratings;
pub mod units;
