use actix_web::{HttpResponse, get};
use crate::services::recipes::RecipeIngredientService;

/// 레시피 재료에 사용할 수 있는 단위 목록 (`GET /api/v1/units`)
#[get("")]
pub async fn list_units() -> HttpResponse {
    HttpResponse::Ok().json(RecipeIngredientService::list_units())
}
