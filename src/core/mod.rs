//! # Core Framework Module
//!
//! 백엔드 서비스를 위한 핵심 프레임워크 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 전역 싱글톤 컨테이너
//! - **자동 레지스트리**: `#[service]`/`#[repository]`가 `inventory`로 컴파일 타임 등록
//! - **이름 조회**: 타입 이름을 snake_case로 바꿔 등록 정보를 찾습니다
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 프레임워크 |
//! |--------|---------------|
//! | `ApplicationContext` | `ServiceLocator` |
//! | `@Repository` | `#[repository(name = "...", collection = "...")]` |
//! | `@Service` | `#[service(name = "...")]` |
//! | `@Autowired` | `Arc<T>` 필드, `StoreHandle` 기본값 |
//! | `@ExceptionHandler` | `AppError::error_response()` |

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
