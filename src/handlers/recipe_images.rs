//! 레시피 이미지 참조 핸들러 (`/api/v1/recipe-images`)

use actix_web::{web, HttpResponse, get, post, delete};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::recipes::{RecipeFilterQuery, RecipeImageRequest};
use crate::services::recipes::RecipeImageService;

#[post("")]
pub async fn create_recipe_image(
    payload: web::Json<RecipeImageRequest>,
    service: web::Data<RecipeImageService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.create_image(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("")]
pub async fn list_recipe_images(
    query: web::Query<RecipeFilterQuery>,
    service: web::Data<RecipeImageService>,
) -> Result<HttpResponse, AppError> {
    let images = service.list_images(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(images))
}

#[get("/{id}")]
pub async fn get_recipe_image(
    id: web::Path<String>,
    service: web::Data<RecipeImageService>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get_image(&id).await?))
}

#[delete("/{id}")]
pub async fn delete_recipe_image(
    id: web::Path<String>,
    service: web::Data<RecipeImageService>,
) -> Result<HttpResponse, AppError> {
    service.delete_image(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}
