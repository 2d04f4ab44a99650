//! # Recipe HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/recipes` | 레시피 생성 | 201 Created |
//! | `GET` | `/api/v1/recipes` | 레시피 목록 (제목순) | 200 OK |
//! | `GET` | `/api/v1/recipes/{id}` | 재료, 이미지, 평점 수 포함 상세 | 200 OK |
//! | `PUT` | `/api/v1/recipes/{id}` | 전체 수정 (평균 평점 유지) | 200 OK |
//! | `DELETE` | `/api/v1/recipes/{id}` | 종속 데이터 포함 삭제 | 204 No Content |
//!
//! `average_rating`은 요청 본문으로 바꿀 수 없습니다. 평점 API를 통해서만 갱신됩니다.

use actix_web::{web, HttpResponse, get, post, put, delete};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::recipes::RecipeRequest;
use crate::services::recipes::RecipeService;

#[post("")]
pub async fn create_recipe(
    payload: web::Json<RecipeRequest>,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.create_recipe(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("")]
pub async fn list_recipes(
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    let recipes = service.list_recipes().await?;

    Ok(HttpResponse::Ok().json(recipes))
}

#[get("/{id}")]
pub async fn get_recipe(
    id: web::Path<String>,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    let recipe = service.get_recipe(&id).await?;

    Ok(HttpResponse::Ok().json(recipe))
}

#[put("/{id}")]
pub async fn update_recipe(
    id: web::Path<String>,
    payload: web::Json<RecipeRequest>,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let recipe = service.update_recipe(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(recipe))
}

#[delete("/{id}")]
pub async fn delete_recipe(
    id: web::Path<String>,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    service.delete_recipe(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}
