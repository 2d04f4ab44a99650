//! 식사 카테고리 핸들러 (`/api/v1/categories`)

use actix_web::{web, HttpResponse, get, post, put, delete};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::categories::CategoryRequest;
use crate::services::categories::CategoryService;

#[post("")]
pub async fn create_category(
    payload: web::Json<CategoryRequest>,
    service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.create_category(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("")]
pub async fn list_categories(
    service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.list_categories().await?))
}

#[get("/{id}")]
pub async fn get_category(
    id: web::Path<String>,
    service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get_category(&id).await?))
}

#[put("/{id}")]
pub async fn update_category(
    id: web::Path<String>,
    payload: web::Json<CategoryRequest>,
    service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.update_category(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 레시피는 남기고 `category_ids`에서만 제거합니다.
#[delete("/{id}")]
pub async fn delete_category(
    id: web::Path<String>,
    service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    service.delete_category(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}
