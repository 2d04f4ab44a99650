//! 레시피 단위 비동기 잠금
//!
//! 평점 변경과 그에 따른 평균 재계산, 레시피 본문 수정이 같은 레시피에 대해
//! 겹치지 않도록 레시피 ID별로 `futures_util::lock::Mutex`를 하나씩 둡니다.
//! 잠금은 프로세스 내부에서만 유효합니다.
//!
//! 키는 ObjectId이므로 재료 ID로도 잠글 수 있습니다. 재료 삭제와 그 재료를 참조하는 행 생성이
//! 이 방식으로 직렬화됩니다. 두 개를 함께 잡을 때는 레시피, 재료 순서를 지킵니다.
//!
//! 테이블은 `main`에서 `ServiceLocator::set`으로 한 번 등록되고, `#[service]`가
//! `Arc<RecipeLocks>` 필드에 같은 인스턴스를 주입합니다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use futures_util::lock::{Mutex as AsyncMutex, OwnedMutexGuard};
use mongodb::bson::oid::ObjectId;

/// 레시피 ID → 비동기 뮤텍스 테이블
#[derive(Default)]
pub struct RecipeLocks {
    locks: Mutex<HashMap<ObjectId, Arc<AsyncMutex<()>>>>,
}

/// 보유하는 동안 해당 레시피의 임계 구역에 단독으로 머뭅니다.
pub struct RecipeGuard {
    _guard: OwnedMutexGuard<()>,
}

impl RecipeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 레시피 잠금을 획득합니다.
    ///
    /// 아무도 보유하거나 기다리지 않는 항목은 이때 테이블에서 정리됩니다.
    pub async fn lock(&self, recipe_id: ObjectId) -> RecipeGuard {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.retain(|id, mutex| *id == recipe_id || Arc::strong_count(mutex) > 1);
            locks.entry(recipe_id).or_default().clone()
        };

        RecipeGuard {
            _guard: mutex.lock_owned().await,
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::join;

    #[actix_web::test]
    async fn test_same_recipe_is_serialized() {
        let locks = RecipeLocks::new();
        let recipe_id = ObjectId::new();
        let events = Mutex::new(Vec::new());

        let first = async {
            let _guard = locks.lock(recipe_id).await;
            events.lock().unwrap().push("first-start");
            actix_web::rt::task::yield_now().await;
            events.lock().unwrap().push("first-end");
        };

        let second = async {
            let _guard = locks.lock(recipe_id).await;
            events.lock().unwrap().push("second");
        };

        join(first, second).await;

        assert_eq!(*events.lock().unwrap(), vec!["first-start", "first-end", "second"]);
    }

    #[actix_web::test]
    async fn test_different_recipes_do_not_block() {
        let locks = RecipeLocks::new();

        let _a = locks.lock(ObjectId::new()).await;
        let _b = locks.lock(ObjectId::new()).await;

        assert_eq!(locks.tracked(), 2);
    }

    #[actix_web::test]
    async fn test_released_locks_are_pruned() {
        let locks = RecipeLocks::new();

        drop(locks.lock(ObjectId::new()).await);
        drop(locks.lock(ObjectId::new()).await);
        let _held = locks.lock(ObjectId::new()).await;

        assert_eq!(locks.tracked(), 1);
    }
}
