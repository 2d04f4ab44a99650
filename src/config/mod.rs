//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//! `main`에서 `PROFILE`에 맞는 `.env.{profile}` 파일을 먼저 로드합니다.
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 (ENVIRONMENT 기본값은 production)
//! export ENVIRONMENT="development"
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export WORKERS="4"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="recipe_catalog"
//! export REDIS_URL="redis://localhost:6379"
//! export RECIPE_CACHE_TTL_SECS="600"
//!
//! # Rate Limiting
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! ```
//!
//! | Spring | Rust (이 프로젝트) |
//! |--------|-------------------|
//! | `@Value("${property}")` | `env::var("PROPERTY")` |
//! | `@Profile("dev")` | `Environment::Development` |
//! | `application.yml` | `.env` 파일 |

pub mod data_config;

pub use data_config::*;
