//! # User Profile HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/users` | 프로필 생성 | 201 Created |
//! | `GET` | `/api/v1/users` | 프로필 목록 | 200 OK |
//! | `GET` | `/api/v1/users/{id}` | 프로필 조회 | 200 OK |
//! | `PUT` | `/api/v1/users/{id}` | 프로필 수정 | 200 OK |
//! | `DELETE` | `/api/v1/users/{id}` | 프로필 및 평점 삭제 | 204 No Content |

use actix_web::{web, HttpResponse, get, post, put, delete};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::users::UserProfileRequest;
use crate::services::users::UserProfileService;

#[post("")]
pub async fn create_profile(
    payload: web::Json<UserProfileRequest>,
    service: web::Data<UserProfileService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.create_profile(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("")]
pub async fn list_profiles(
    service: web::Data<UserProfileService>,
) -> Result<HttpResponse, AppError> {
    let profiles = service.list_profiles().await?;

    Ok(HttpResponse::Ok().json(profiles))
}

#[get("/{id}")]
pub async fn get_profile(
    id: web::Path<String>,
    service: web::Data<UserProfileService>,
) -> Result<HttpResponse, AppError> {
    let profile = service.get_profile(&id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[put("/{id}")]
pub async fn update_profile(
    id: web::Path<String>,
    payload: web::Json<UserProfileRequest>,
    service: web::Data<UserProfileService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let profile = service.update_profile(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// 프로필과 그 사용자의 평점을 모두 삭제합니다. 영향받은 레시피의 평균은 다시 계산됩니다.
#[delete("/{id}")]
pub async fn delete_profile(
    id: web::Path<String>,
    service: web::Data<UserProfileService>,
) -> Result<HttpResponse, AppError> {
    service.delete_profile(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}
