//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 레시피 조회 캐시입니다.
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("recipe:65f0c0ffee...", &recipe, 600).await?;
//! let cached: Option<Recipe> = cache.get("recipe:65f0c0ffee...").await?;
//! cache.del("recipe:65f0c0ffee...").await?;
//! ```
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! RECIPE_CACHE_TTL_SECS=600
//! ```

pub mod redis;
