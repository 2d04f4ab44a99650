//! 레시피 카탈로그 백엔드
//!
//! 레시피, 재료, 식사 카테고리, 사용자 프로필을 관리하고, 사용자 평점으로부터
//! 레시피의 `average_rating`을 집계하는 REST 서비스입니다.
//!
//! # Features
//!
//! - **레시피 관리**: 재료 행(수량, 단위), 이미지 경로, 카테고리 연결
//! - **평점 집계**: 평점 변경마다 레시피 단위 잠금 안에서 평균 재계산
//! - **연쇄 삭제**: 레시피/재료/프로필 삭제 시 종속 데이터 정리
//! - **싱글톤 DI**: `inventory` 기반 자동 등록과 `ServiceLocator`
//! - **MongoDB**: 영구 저장
//! - **Redis**: 레시피 조회 캐시
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, RatingService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← Store 트레이트 구현
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use recipe_catalog_backend::services::ratings::RatingService;
//!
//! let change = RatingService::instance().upsert_rating(request).await?;
//! assert!((0.0..=5.0).contains(&change.average_rating));
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
