//! # Rating HTTP Handlers
//!
//! 모든 평점 변경은 [`RatingService`]를 거치며, 응답에 재계산된 `average_rating`이 포함됩니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/ratings` | 평점 등록 또는 교체 | 200 OK |
//! | `GET` | `/api/v1/ratings` | 목록 (`?recipe_id=`, `?user_id=`) | 200 OK |
//! | `GET` | `/api/v1/ratings/{id}` | 조회 | 200 OK |
//! | `PUT` | `/api/v1/ratings/{id}` | 값 수정 | 200 OK |
//! | `DELETE` | `/api/v1/ratings/{id}` | 삭제 | 200 OK |
//!
//! ```json
//! {
//!   "rating": { "id": "...", "user_id": "...", "recipe_id": "...", "rating": 4, ... },
//!   "average_rating": 4.0
//! }
//! ```

use actix_web::{web, HttpResponse, get, post, put, delete};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::ratings::{RatingQuery, RatingRequest, UpdateRatingRequest};
use crate::services::ratings::RatingService;

#[post("")]
pub async fn upsert_rating(
    payload: web::Json<RatingRequest>,
    service: web::Data<RatingService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let change = service.upsert_rating(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(change))
}

#[get("")]
pub async fn list_ratings(
    query: web::Query<RatingQuery>,
    service: web::Data<RatingService>,
) -> Result<HttpResponse, AppError> {
    let ratings = service.list_ratings(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ratings))
}

#[get("/{id}")]
pub async fn get_rating(
    id: web::Path<String>,
    service: web::Data<RatingService>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.get_rating(&id).await?))
}

#[put("/{id}")]
pub async fn update_rating(
    id: web::Path<String>,
    payload: web::Json<UpdateRatingRequest>,
    service: web::Data<RatingService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let change = service.update_rating(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(change))
}

#[delete("/{id}")]
pub async fn delete_rating(
    id: web::Path<String>,
    service: web::Data<RatingService>,
) -> Result<HttpResponse, AppError> {
    let average_rating = service.delete_rating(&id).await?;

    Ok(HttpResponse::Ok().json(json!({ "average_rating": average_rating })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::{http::StatusCode, test, App};
    use mongodb::bson::oid::ObjectId;
    use crate::domain::entities::{Recipe, RecipeDetails, UserProfile};
    use crate::repositories::memory::MemoryCatalog;
    use crate::repositories::stores::{RecipeStore, UserProfileStore};
    use crate::services::recipe_locks::RecipeLocks;

    async fn seeded() -> (web::Data<RatingService>, ObjectId, ObjectId) {
        let store = MemoryCatalog::new();
        let service = RatingService::with_stores(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(RecipeLocks::new()),
        );

        let recipe = store
            .insert_recipe(Recipe::new(RecipeDetails {
                title: "Lecsó".to_string(),
                ..Default::default()
            }))
            .await
            .unwrap();
        let profile = store
            .insert_profile(UserProfile::new(
                "kovacs".to_string(),
                "Kovács".to_string(),
                "Anna".to_string(),
                "anna@example.com".to_string(),
            ))
            .await
            .unwrap();

        (web::Data::new(service), recipe.id.unwrap(), profile.id.unwrap())
    }

    fn rating_scope() -> actix_web::Scope {
        web::scope("/api/v1/ratings")
            .service(upsert_rating)
            .service(list_ratings)
            .service(get_rating)
            .service(update_rating)
            .service(delete_rating)
    }

    #[actix_web::test]
    async fn test_out_of_range_rating_is_rejected_with_error_body() {
        let (service, recipe_id, user_id) = seeded().await;
        let app = test::init_service(App::new().app_data(service).service(rating_scope())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/ratings")
            .set_json(json!({
                "user_id": user_id.to_hex(),
                "recipe_id": recipe_id.to_hex(),
                "rating": 6
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().is_some_and(|msg| msg.contains("평점은 0에서 5 사이")));
    }

    #[actix_web::test]
    async fn test_upsert_then_delete_returns_recomputed_average() {
        let (service, recipe_id, user_id) = seeded().await;
        let app = test::init_service(App::new().app_data(service).service(rating_scope())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/ratings")
            .set_json(json!({
                "user_id": user_id.to_hex(),
                "recipe_id": recipe_id.to_hex(),
                "rating": 4
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["average_rating"], 4.0);
        assert_eq!(created["rating"]["rating"], 4);

        let rating_id = created["rating"]["id"].as_str().unwrap().to_string();
        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/ratings/{}", rating_id))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "average_rating": 0.0 }));
    }

    #[actix_web::test]
    async fn test_unknown_rating_id_maps_to_not_found() {
        let (service, _, _) = seeded().await;
        let app = test::init_service(App::new().app_data(service).service(rating_scope())).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/ratings/{}", ObjectId::new().to_hex()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_malformed_rating_id_maps_to_bad_request() {
        let (service, _, _) = seeded().await;
        let app = test::init_service(App::new().app_data(service).service(rating_scope())).await;

        let req = test::TestRequest::put()
            .uri("/api/v1/ratings/not-an-object-id")
            .set_json(json!({ "rating": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_rating_for_unknown_profile_maps_to_not_found() {
        let (service, recipe_id, _) = seeded().await;
        let app = test::init_service(App::new().app_data(service).service(rating_scope())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/ratings")
            .set_json(json!({
                "user_id": ObjectId::new().to_hex(),
                "recipe_id": recipe_id.to_hex(),
                "rating": 2
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_list_filters_by_recipe() {
        let (service, recipe_id, user_id) = seeded().await;
        let app = test::init_service(App::new().app_data(service).service(rating_scope())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/ratings")
            .set_json(json!({
                "user_id": user_id.to_hex(),
                "recipe_id": recipe_id.to_hex(),
                "rating": 5
            }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/ratings?recipe_id={}", recipe_id.to_hex()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/ratings?recipe_id={}", ObjectId::new().to_hex()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().map(Vec::len), Some(0));
    }
}
