//! # User Profile Service
//!
//! 레시피를 평가하는 사용자의 프로필을 관리합니다. `user_id`는 외부 인증 시스템의
//! 식별자이며 전체에서 유일합니다.
//!
//! 프로필을 삭제하면 그 사용자의 평점이 모두 삭제되고, 영향받은 레시피의 평균이
//! [`RatingService::remove_ratings_for_user`]를 통해 다시 계산됩니다.

use std::sync::Arc;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::users::{UserProfileRequest, UserProfileResponse},
        entities::UserProfile,
    },
    repositories::stores::{StoreHandle, UserProfileStore},
    services::ratings::RatingService,
    utils::string_utils::{parse_object_id, validate_required_string},
};

const DUPLICATE_USER_ID: &str = "이미 등록된 사용자 식별자입니다";

/// 사용자 프로필 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리되며, `ratings` 필드는
/// `ServiceLocator::get::<RatingService>()`로 주입됩니다.
///
/// # 예제
///
/// ```rust,ignore
/// let service = UserProfileService::instance();
///
/// let profile = service.create_profile(UserProfileRequest {
///     user_id: "anna.kovacs".to_string(),
///     first_name: "Anna".to_string(),
///     last_name: "Kovács".to_string(),
///     email: "Anna@Example.com".to_string(),
/// }).await?;
///
/// assert_eq!(profile.email, "anna@example.com");
/// ```
#[service(name = "user_profile")]
pub struct UserProfileService {
    profiles: StoreHandle<dyn UserProfileStore>,
    ratings: Arc<RatingService>,
}

impl UserProfileService {
    /// 저장소와 평점 서비스를 직접 지정해 생성합니다.
    pub fn with_stores(profiles: Arc<dyn UserProfileStore>, ratings: Arc<RatingService>) -> Self {
        Self { profiles: profiles.into(), ratings }
    }

    /// 새 프로필을 등록합니다.
    ///
    /// # 인자
    ///
    /// * `request` - `user_id`, 이름, 이메일. 이메일은 공백 제거 후 소문자로 저장됩니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(UserProfileResponse)` - 생성된 프로필
    /// * `Err(AppError::ConflictError)` - 같은 `user_id`의 프로필이 이미 있는 경우
    /// * `Err(AppError::ValidationError)` - 필수 값이 비어 있는 경우
    pub async fn create_profile(&self, request: UserProfileRequest) -> AppResult<UserProfileResponse> {
        let user_id = validate_required_string(&request.user_id, "user_id")?;

        if self.profiles.find_profile_by_user_id(&user_id).await?.is_some() {
            return Err(AppError::ConflictError(DUPLICATE_USER_ID.to_string()));
        }

        let profile = UserProfile::new(
            user_id,
            validate_required_string(&request.first_name, "first_name")?,
            validate_required_string(&request.last_name, "last_name")?,
            request.email.trim().to_lowercase(),
        );

        let saved = self.profiles.insert_profile(profile).await?;
        log::info!("프로필 생성: {}", saved);
        Ok(UserProfileResponse::from(saved))
    }

    pub async fn get_profile(&self, id: &str) -> AppResult<UserProfileResponse> {
        let profile_id = parse_object_id(id, "profile id")?;
        self.require(&profile_id).await.map(UserProfileResponse::from)
    }

    pub async fn list_profiles(&self) -> AppResult<Vec<UserProfileResponse>> {
        let profiles = self.profiles.list_profiles().await?;
        Ok(profiles.into_iter().map(UserProfileResponse::from).collect())
    }

    pub async fn update_profile(&self, id: &str, request: UserProfileRequest) -> AppResult<UserProfileResponse> {
        let profile_id = parse_object_id(id, "profile id")?;
        let user_id = validate_required_string(&request.user_id, "user_id")?;
        let mut profile = self.require(&profile_id).await?;

        if let Some(other) = self.profiles.find_profile_by_user_id(&user_id).await? {
            if other.id != profile.id {
                return Err(AppError::ConflictError(DUPLICATE_USER_ID.to_string()));
            }
        }

        profile.user_id = user_id;
        profile.first_name = validate_required_string(&request.first_name, "first_name")?;
        profile.last_name = validate_required_string(&request.last_name, "last_name")?;
        profile.email = request.email.trim().to_lowercase();
        profile.updated_at = Utc::now();

        self.profiles.save_profile(&profile).await?;
        Ok(UserProfileResponse::from(profile))
    }

    /// 프로필을 삭제한 뒤 그 사용자의 평점을 정리합니다.
    ///
    /// 프로필이 먼저 사라지므로, 동시에 진행 중인 평점 등록은 잠금 안의 재확인에서
    /// 스스로 취소되고 그 전에 저장된 평점은 이어지는 정리에서 삭제됩니다.
    pub async fn delete_profile(&self, id: &str) -> AppResult<()> {
        let profile_id = parse_object_id(id, "profile id")?;
        let profile = self.require(&profile_id).await?;

        self.profiles.delete_profile(&profile_id).await?;
        let removed = self.ratings.remove_ratings_for_user(&profile_id).await?;

        log::info!("프로필 삭제: {} (평점 {}건 정리)", profile, removed);
        Ok(())
    }

    async fn require(&self, id: &ObjectId) -> AppResult<UserProfile> {
        self.profiles
            .find_profile(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자 프로필을 찾을 수 없습니다".to_string()))
    }
}
