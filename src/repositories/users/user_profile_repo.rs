//! # 사용자 프로필 리포지토리
//!
//! `user_profiles` 컬렉션을 담당합니다. `user_id`는 유니크 인덱스로 보호되며,
//! 중복 삽입은 `ConflictError`로 변환됩니다.

use std::sync::Arc;
use async_trait::async_trait;
use singleton_macro::repository;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::{doc, oid::ObjectId}, options::IndexOptions};
use crate::{
    core::errors::{AppError, AppResult, db_error, write_error},
    db::Database,
    domain::entities::users::UserProfile,
    repositories::stores::UserProfileStore,
};

const DUPLICATE_USER: &str = "이미 프로필이 있는 사용자입니다";

/// 사용자 프로필 데이터 액세스 리포지토리
///
/// ```rust,ignore
/// let repo = UserProfileRepository::instance();
/// let profile = repo.find_profile_by_user_id("anna.kovacs").await?;
/// ```
#[repository(name = "user_profile", collection = "user_profiles")]
pub struct UserProfileRepository {
    db: Arc<Database>,
}

impl UserProfileRepository {
    /// 컬렉션 인덱스를 생성합니다. 기동 시 [`create_indexes`](crate::repositories::create_indexes)에서 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .name("email".to_string())
                .build())
            .build();

        self.collection::<UserProfile>()
            .create_indexes([user_id_index, email_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl UserProfileStore for UserProfileRepository {
    async fn insert_profile(&self, mut profile: UserProfile) -> AppResult<UserProfile> {
        profile.id = Some(ObjectId::new());

        self.collection::<UserProfile>()
            .insert_one(&profile)
            .await
            .map_err(|e| write_error(e, DUPLICATE_USER))?;

        Ok(profile)
    }

    async fn find_profile(&self, id: &ObjectId) -> AppResult<Option<UserProfile>> {
        self.collection::<UserProfile>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn find_profile_by_user_id(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        self.collection::<UserProfile>()
            .find_one(doc! { "user_id": user_id })
            .await
            .map_err(db_error)
    }

    async fn list_profiles(&self) -> AppResult<Vec<UserProfile>> {
        self.collection::<UserProfile>()
            .find(doc! {})
            .sort(doc! { "user_id": 1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        let id = profile.id
            .ok_or_else(|| AppError::InternalError("ID 없는 프로필은 저장할 수 없습니다".to_string()))?;

        self.collection::<UserProfile>()
            .replace_one(doc! { "_id": id }, profile)
            .await
            .map_err(|e| write_error(e, DUPLICATE_USER))?;

        Ok(())
    }

    async fn delete_profile(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<UserProfile>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }
}
