//! API 라우트 설정 모듈
//!
//! 리소스별 `/api/v1/*` 스코프와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::services::categories::CategoryService;
use crate::services::ingredients::IngredientService;
use crate::services::ratings::RatingService;
use crate::services::recipes::{RecipeImageService, RecipeIngredientService, RecipeService};
use crate::services::users::UserProfileService;
use actix_web::web;
use serde_json::json;

/// 등록되는 API 스코프 목록 (시작 배너 출력용)
pub const API_SCOPES: [&str; 8] = [
    "/api/v1/users",
    "/api/v1/categories",
    "/api/v1/ingredients",
    "/api/v1/recipes",
    "/api/v1/recipe-ingredients",
    "/api/v1/recipe-images",
    "/api/v1/ratings",
    "/api/v1/units",
];

/// 모든 라우트를 설정합니다
///
/// 핸들러는 `web::Data<XService>`로 서비스를 받으므로 라우트 등록 전에
/// [`register_services`]가 싱글톤 인스턴스를 앱 데이터로 올립니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    register_services(cfg);
    cfg.service(health_check);

    configure_user_routes(cfg);
    configure_catalog_routes(cfg);
    configure_recipe_routes(cfg);
    configure_rating_routes(cfg);
}

/// `#[service]` 싱글톤을 `web::Data`로 감싸 앱 데이터에 등록합니다.
///
/// `web::Data::from`은 기존 `Arc`를 그대로 공유하므로 워커마다 같은 인스턴스를 봅니다.
/// `ServiceLocator::initialize_all()` 이후에 호출되어야 합니다.
fn register_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::from(UserProfileService::instance()))
        .app_data(web::Data::from(CategoryService::instance()))
        .app_data(web::Data::from(IngredientService::instance()))
        .app_data(web::Data::from(RecipeService::instance()))
        .app_data(web::Data::from(RecipeIngredientService::instance()))
        .app_data(web::Data::from(RecipeImageService::instance()))
        .app_data(web::Data::from(RatingService::instance()));
}

/// 사용자 프로필 라우트
///
/// 프로필 삭제는 평점 정리와 평균 재계산을 동반합니다.
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(handlers::users::create_profile)
            .service(handlers::users::list_profiles)
            .service(handlers::users::get_profile)
            .service(handlers::users::update_profile)
            .service(handlers::users::delete_profile)
    );
}

/// 카테고리, 재료 마스터, 단위 목록 라우트
fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/categories")
            .service(handlers::categories::create_category)
            .service(handlers::categories::list_categories)
            .service(handlers::categories::get_category)
            .service(handlers::categories::update_category)
            .service(handlers::categories::delete_category)
    );

    cfg.service(
        web::scope("/api/v1/ingredients")
            .service(handlers::ingredients::create_ingredient)
            .service(handlers::ingredients::list_ingredients)
            .service(handlers::ingredients::get_ingredient)
            .service(handlers::ingredients::update_ingredient)
            .service(handlers::ingredients::delete_ingredient)
    );

    cfg.service(
        web::scope("/api/v1/units")
            .service(handlers::units::list_units)
    );
}

/// 레시피와 그 하위 리소스(재료 행, 이미지) 라우트
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/recipe-ingredients \
///   -H "Content-Type: application/json" \
///   -d '{"recipe_id":"65f1a2b3c4d5e6f708192a3b","manual_ingredient_name":"só","quantity":"1","unit":"csipet"}'
///
/// curl "http://localhost:8080/api/v1/recipe-images?recipe_id=65f1a2b3c4d5e6f708192a3b"
/// ```
fn configure_recipe_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/recipes")
            .service(handlers::recipes::create_recipe)
            .service(handlers::recipes::list_recipes)
            .service(handlers::recipes::get_recipe)
            .service(handlers::recipes::update_recipe)
            .service(handlers::recipes::delete_recipe)
    );

    cfg.service(
        web::scope("/api/v1/recipe-ingredients")
            .service(handlers::recipe_ingredients::create_recipe_ingredient)
            .service(handlers::recipe_ingredients::list_recipe_ingredients)
            .service(handlers::recipe_ingredients::get_recipe_ingredient)
            .service(handlers::recipe_ingredients::update_recipe_ingredient)
            .service(handlers::recipe_ingredients::delete_recipe_ingredient)
    );

    cfg.service(
        web::scope("/api/v1/recipe-images")
            .service(handlers::recipe_images::create_recipe_image)
            .service(handlers::recipe_images::list_recipe_images)
            .service(handlers::recipe_images::get_recipe_image)
            .service(handlers::recipe_images::delete_recipe_image)
    );
}

/// 평점 라우트
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/ratings \
///   -H "Content-Type: application/json" \
///   -d '{"user_id":"65f1a2b3c4d5e6f708192a3c","recipe_id":"65f1a2b3c4d5e6f708192a3b","rating":4}'
/// ```
fn configure_rating_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/ratings")
            .service(handlers::ratings::upsert_rating)
            .service(handlers::ratings::list_ratings)
            .service(handlers::ratings::get_rating)
            .service(handlers::ratings::update_rating)
            .service(handlers::ratings::delete_rating)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "recipe_catalog_backend",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "cache": "Redis"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "recipe_catalog_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;
        let req = test::TestRequest::get().uri("/health").to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "recipe_catalog_backend");
    }

    #[actix_web::test]
    async fn test_units_endpoint_lists_all_units() {
        let app = test::init_service(
            App::new().service(web::scope("/api/v1/units").service(handlers::units::list_units)),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/v1/units").to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.as_array().map(Vec::len), Some(8));
        assert_eq!(body[6]["code"], "evk");
        assert_eq!(body[6]["label"], "Evőkanál");
    }
}
