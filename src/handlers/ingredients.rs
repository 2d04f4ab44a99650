//! 재료 마스터 핸들러 (`/api/v1/ingredients`)

use actix_web::{web, HttpResponse, get, post, put, delete};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::ingredients::IngredientRequest;
use crate::services::ingredients::IngredientService;

#[post("")]
pub async fn create_ingredient(
    payload: web::Json<IngredientRequest>,
    service: web::Data<IngredientService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.create_ingredient(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("")]
pub async fn list_ingredients(
    service: web::Data<IngredientService>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.list_ingredients().await?))
}

#[get("/{id}")]
pub async fn get_ingredient(
    id: web::Path<String>,
    service: web::Data<IngredientService>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get_ingredient(&id).await?))
}

#[put("/{id}")]
pub async fn update_ingredient(
    id: web::Path<String>,
    payload: web::Json<IngredientRequest>,
    service: web::Data<IngredientService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.update_ingredient(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 이 재료를 참조하는 레시피 재료 행도 함께 삭제됩니다.
#[delete("/{id}")]
pub async fn delete_ingredient(
    id: web::Path<String>,
    service: web::Data<IngredientService>,
) -> Result<HttpResponse, AppError> {
    service.delete_ingredient(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}
