//! 레시피 재료 행 핸들러 (`/api/v1/recipe-ingredients`)

use actix_web::{web, HttpResponse, get, post, put, delete};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::recipes::{RecipeFilterQuery, RecipeIngredientRequest};
use crate::services::recipes::RecipeIngredientService;

#[post("")]
pub async fn create_recipe_ingredient(
    payload: web::Json<RecipeIngredientRequest>,
    service: web::Data<RecipeIngredientService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.create_row(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// `?recipe_id=`로 한 레시피의 행만 조회할 수 있습니다.
#[get("")]
pub async fn list_recipe_ingredients(
    query: web::Query<RecipeFilterQuery>,
    service: web::Data<RecipeIngredientService>,
) -> Result<HttpResponse, AppError> {
    let rows = service.list_rows(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(rows))
}

#[get("/{id}")]
pub async fn get_recipe_ingredient(
    id: web::Path<String>,
    service: web::Data<RecipeIngredientService>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get_row(&id).await?))
}

#[put("/{id}")]
pub async fn update_recipe_ingredient(
    id: web::Path<String>,
    payload: web::Json<RecipeIngredientRequest>,
    service: web::Data<RecipeIngredientService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.update_row(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{id}")]
pub async fn delete_recipe_ingredient(
    id: web::Path<String>,
    service: web::Data<RecipeIngredientService>,
) -> Result<HttpResponse, AppError> {
    service.delete_row(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}
