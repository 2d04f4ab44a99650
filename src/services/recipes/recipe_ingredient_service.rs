//! 레시피 재료 행 서비스
//!
//! 행은 반드시 존재하는 레시피에 속하며, 재료 마스터를 참조할 경우 그 재료도 존재해야 합니다.
//!
//! 생성과 수정은 대상 레시피와 참조 재료의 잠금을 잡은 뒤 존재 여부를 확인하고 저장합니다.
//! 레시피 삭제와 재료 삭제도 같은 잠금을 잡으므로, 확인과 저장 사이에 부모가 사라져
//! 고아 행이 남는 일이 없습니다. 잠금 순서는 항상 레시피, 재료 순입니다.

use std::sync::Arc;
use singleton_macro::service;
use mongodb::bson::oid::ObjectId;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::recipes::{RecipeFilterQuery, RecipeIngredientRequest, RecipeIngredientResponse, UnitResponse},
        entities::{RecipeIngredient, Unit},
    },
    repositories::stores::{IngredientStore, RecipeIngredientStore, RecipeStore, StoreHandle},
    services::recipe_locks::{RecipeGuard, RecipeLocks},
    utils::string_utils::{clean_optional_string, parse_object_id},
};

/// 레시피 재료 행 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리됩니다. `locks`는 레시피 서비스, 재료 서비스와
/// 같은 [`RecipeLocks`] 테이블입니다.
///
/// # 예제
///
/// ```rust,ignore
/// let service = RecipeIngredientService::instance();
/// let rows = service.list_rows(RecipeFilterQuery { recipe_id: Some(recipe_id.to_hex()) }).await?;
///
/// for row in rows {
///     println!("{}", row.display);
/// }
/// ```
#[service(name = "recipe_ingredient")]
pub struct RecipeIngredientService {
    rows: StoreHandle<dyn RecipeIngredientStore>,
    recipes: StoreHandle<dyn RecipeStore>,
    ingredients: StoreHandle<dyn IngredientStore>,
    locks: Arc<RecipeLocks>,
}

impl RecipeIngredientService {
    /// 저장소를 직접 지정해 생성합니다.
    pub fn with_stores(
        rows: Arc<dyn RecipeIngredientStore>,
        recipes: Arc<dyn RecipeStore>,
        ingredients: Arc<dyn IngredientStore>,
        locks: Arc<RecipeLocks>,
    ) -> Self {
        Self { rows: rows.into(), recipes: recipes.into(), ingredients: ingredients.into(), locks }
    }

    /// 선택 가능한 단위 전체 (코드, 라벨)
    pub fn list_units() -> Vec<UnitResponse> {
        Unit::ALL.into_iter().map(UnitResponse::from).collect()
    }

    /// 레시피 재료 행 추가
    ///
    /// # 반환값
    ///
    /// * `Ok(RecipeIngredientResponse)` - 저장된 행과 표시 문자열
    /// * `Err(AppError::NotFound)` - 레시피가 없거나 잠금 대기 중 삭제됨
    /// * `Err(AppError::ValidationError)` - 재료/이름 누락, 없는 재료, 수량 정밀도 초과
    pub async fn create_row(&self, request: RecipeIngredientRequest) -> AppResult<RecipeIngredientResponse> {
        let (recipe_id, ingredient_id) = parse_refs(&request)?;
        let _guards = self.lock_refs(recipe_id, ingredient_id).await;

        let (row, ingredient_name) = self.row_from(recipe_id, ingredient_id, request).await?;
        let saved = self.rows.insert_recipe_ingredient(row).await?;

        log::info!("레시피 재료 추가: recipe={} {:?}", saved.recipe_id, saved.id);
        Ok(RecipeIngredientResponse::new(saved, ingredient_name.as_deref()))
    }

    pub async fn get_row(&self, id: &str) -> AppResult<RecipeIngredientResponse> {
        let row_id = parse_object_id(id, "recipe ingredient id")?;
        let row = self.require_row(&row_id).await?;
        let ingredient_name = self.ingredient_name(row.ingredient_id).await?;

        Ok(RecipeIngredientResponse::new(row, ingredient_name.as_deref()))
    }

    /// `recipe_id`가 주어지면 해당 레시피의 행만 반환합니다.
    pub async fn list_rows(&self, query: RecipeFilterQuery) -> AppResult<Vec<RecipeIngredientResponse>> {
        let recipe_id = query
            .recipe_id
            .as_deref()
            .map(|raw| parse_object_id(raw, "recipe_id"))
            .transpose()?;

        let rows = self.rows.list_recipe_ingredients(recipe_id.as_ref()).await?;

        let mut responses = Vec::with_capacity(rows.len());
        for row in rows {
            let ingredient_name = self.ingredient_name(row.ingredient_id).await?;
            responses.push(RecipeIngredientResponse::new(row, ingredient_name.as_deref()));
        }
        Ok(responses)
    }

    pub async fn update_row(&self, id: &str, request: RecipeIngredientRequest) -> AppResult<RecipeIngredientResponse> {
        let row_id = parse_object_id(id, "recipe ingredient id")?;
        let (recipe_id, ingredient_id) = parse_refs(&request)?;
        let _guards = self.lock_refs(recipe_id, ingredient_id).await;

        self.require_row(&row_id).await?;
        let (mut row, ingredient_name) = self.row_from(recipe_id, ingredient_id, request).await?;
        row.id = Some(row_id);
        self.rows.save_recipe_ingredient(&row).await?;

        Ok(RecipeIngredientResponse::new(row, ingredient_name.as_deref()))
    }

    pub async fn delete_row(&self, id: &str) -> AppResult<()> {
        let row_id = parse_object_id(id, "recipe ingredient id")?;

        if !self.rows.delete_recipe_ingredient(&row_id).await? {
            return Err(AppError::NotFound("레시피 재료를 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    /// 레시피 잠금, 재료 잠금 순으로 획득합니다.
    async fn lock_refs(&self, recipe_id: ObjectId, ingredient_id: Option<ObjectId>) -> Vec<RecipeGuard> {
        let mut guards = vec![self.locks.lock(recipe_id).await];
        if let Some(ingredient_id) = ingredient_id.filter(|id| *id != recipe_id) {
            guards.push(self.locks.lock(ingredient_id).await);
        }
        guards
    }

    /// 요청 검증 후 행과 참조 재료 이름을 만듭니다. 참조 잠금을 보유한 상태에서 호출해야 합니다.
    async fn row_from(
        &self,
        recipe_id: ObjectId,
        ingredient_id: Option<ObjectId>,
        request: RecipeIngredientRequest,
    ) -> AppResult<(RecipeIngredient, Option<String>)> {
        if self.recipes.find_recipe(&recipe_id).await?.is_none() {
            return Err(AppError::NotFound("레시피를 찾을 수 없습니다".to_string()));
        }

        let ingredient_name = match ingredient_id {
            Some(ref id) => Some(
                self.ingredients
                    .find_ingredient(id)
                    .await?
                    .ok_or_else(|| AppError::ValidationError("존재하지 않는 재료입니다".to_string()))?
                    .name,
            ),
            None => None,
        };

        let row = RecipeIngredient::new(
            recipe_id,
            ingredient_id,
            request.manual_ingredient_name,
            request.quantity,
            request.unit,
            clean_optional_string(request.comments),
        )?;

        Ok((row, ingredient_name))
    }

    async fn ingredient_name(&self, ingredient_id: Option<ObjectId>) -> AppResult<Option<String>> {
        let Some(id) = ingredient_id else {
            return Ok(None);
        };
        Ok(self.ingredients.find_ingredient(&id).await?.map(|ingredient| ingredient.name))
    }

    async fn require_row(&self, row_id: &ObjectId) -> AppResult<RecipeIngredient> {
        self.rows
            .find_recipe_ingredient(row_id)
            .await?
            .ok_or_else(|| AppError::NotFound("레시피 재료를 찾을 수 없습니다".to_string()))
    }
}

fn parse_refs(request: &RecipeIngredientRequest) -> AppResult<(ObjectId, Option<ObjectId>)> {
    let recipe_id = parse_object_id(&request.recipe_id, "recipe_id")?;
    let ingredient_id = request
        .ingredient_id
        .as_deref()
        .map(|raw| parse_object_id(raw, "ingredient_id"))
        .transpose()?;

    Ok((recipe_id, ingredient_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use bigdecimal::BigDecimal;
    use crate::domain::entities::{Ingredient, Recipe, RecipeDetails};
    use crate::repositories::memory::MemoryCatalog;

    fn service(store: &Arc<MemoryCatalog>) -> RecipeIngredientService {
        service_with_locks(store, Arc::new(RecipeLocks::new()))
    }

    fn service_with_locks(store: &Arc<MemoryCatalog>, locks: Arc<RecipeLocks>) -> RecipeIngredientService {
        RecipeIngredientService::with_stores(store.clone(), store.clone(), store.clone(), locks)
    }

    async fn recipe(store: &Arc<MemoryCatalog>, title: &str) -> ObjectId {
        let details = RecipeDetails { title: title.to_string(), ..Default::default() };
        store.insert_recipe(Recipe::new(details)).await.unwrap().id.unwrap()
    }

    fn request(recipe_id: &ObjectId, quantity: &str) -> RecipeIngredientRequest {
        RecipeIngredientRequest {
            recipe_id: recipe_id.to_hex(),
            ingredient_id: None,
            manual_ingredient_name: Some("házi tejföl".to_string()),
            quantity: BigDecimal::from_str(quantity).unwrap(),
            unit: Unit::Evk,
            comments: None,
        }
    }

    #[test]
    fn test_units_are_listed_in_order() {
        let units = RecipeIngredientService::list_units();

        assert_eq!(units.len(), 8);
        assert_eq!(units[0], UnitResponse { code: "ml".to_string(), label: "Milliliter".to_string() });
        assert_eq!(units[7].code, "csipet");
    }

    #[actix_web::test]
    async fn test_create_row_with_manual_name() {
        let store = MemoryCatalog::new();
        let recipe_id = recipe(&store, "Rakott krumpli").await;

        let created = service(&store).create_row(request(&recipe_id, "2")).await.unwrap();

        assert_eq!(created.display, "2.00 Evőkanál házi tejföl");
        assert_eq!(created.unit_label, "Evőkanál");
    }

    #[actix_web::test]
    async fn test_referenced_ingredient_name_is_resolved() {
        let store = MemoryCatalog::new();
        let recipe_id = recipe(&store, "Pogácsa").await;
        let flour = store.insert_ingredient(Ingredient::new("liszt".to_string())).await.unwrap();

        let mut req = request(&recipe_id, "0.5");
        req.ingredient_id = Some(flour.id.unwrap().to_hex());
        req.manual_ingredient_name = None;
        req.unit = Unit::Kg;

        let created = service(&store).create_row(req).await.unwrap();
        assert_eq!(created.display, "0.50 Kilogram liszt");
    }

    #[actix_web::test]
    async fn test_missing_recipe_or_ingredient_is_rejected() {
        let store = MemoryCatalog::new();
        let service = service(&store);

        let orphan = service.create_row(request(&ObjectId::new(), "1")).await;
        assert!(matches!(orphan, Err(AppError::NotFound(_))));

        let recipe_id = recipe(&store, "Lecsó").await;
        let mut req = request(&recipe_id, "1");
        req.ingredient_id = Some(ObjectId::new().to_hex());
        assert!(matches!(service.create_row(req).await, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_quantity_precision_is_enforced() {
        let store = MemoryCatalog::new();
        let recipe_id = recipe(&store, "Lecsó").await;
        let service = service(&store);

        let too_precise = service.create_row(request(&recipe_id, "1.005")).await;
        assert!(matches!(too_precise, Err(AppError::ValidationError(_))));

        let too_large = service.create_row(request(&recipe_id, "1000000")).await;
        assert!(matches!(too_large, Err(AppError::ValidationError(_))));

        assert!(service.create_row(request(&recipe_id, "999999.99")).await.is_ok());
    }

    #[actix_web::test]
    async fn test_list_filters_by_recipe_and_delete() {
        let store = MemoryCatalog::new();
        let service = service(&store);
        let first = recipe(&store, "Első").await;
        let second = recipe(&store, "Második").await;

        let row = service.create_row(request(&first, "1")).await.unwrap();
        service.create_row(request(&second, "3")).await.unwrap();

        let filtered = service
            .list_rows(RecipeFilterQuery { recipe_id: Some(first.to_hex()) })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(service.list_rows(RecipeFilterQuery::default()).await.unwrap().len(), 2);

        service.delete_row(&row.id).await.unwrap();
        assert!(matches!(service.get_row(&row.id).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_update_replaces_row() {
        let store = MemoryCatalog::new();
        let service = service(&store);
        let recipe_id = recipe(&store, "Gulyás").await;
        let row = service.create_row(request(&recipe_id, "1")).await.unwrap();

        let mut req = request(&recipe_id, "3.5");
        req.manual_ingredient_name = Some("paprika".to_string());
        req.unit = Unit::Tk;

        let updated = service.update_row(&row.id, req).await.unwrap();

        assert_eq!(updated.id, row.id);
        assert_eq!(updated.display, "3.50 Teáskanál paprika");
    }

    #[actix_web::test]
    async fn test_zero_quantity_is_returned_with_two_decimals() {
        let store = MemoryCatalog::new();
        let recipe_id = recipe(&store, "Húsleves").await;

        let mut req = request(&recipe_id, "0");
        req.manual_ingredient_name = Some("só".to_string());
        req.unit = Unit::Csipet;
        let created = service(&store).create_row(req).await.unwrap();

        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["quantity"], "0.00");
        assert_eq!(json["display"], "0.00 Csipet só");
    }

    #[actix_web::test]
    async fn test_row_is_not_created_for_recipe_deleted_while_waiting() {
        let store = MemoryCatalog::new();
        let locks = Arc::new(RecipeLocks::new());
        let service = service_with_locks(&store, locks.clone());
        let recipe_id = recipe(&store, "Töltött káposzta").await;

        let guard = locks.lock(recipe_id).await;
        let pending = service.create_row(request(&recipe_id, "1"));
        futures_util::pin_mut!(pending);
        assert!(futures_util::poll!(&mut pending).is_pending());

        store.delete_for_recipe(&recipe_id).await.unwrap();
        store.delete_recipe(&recipe_id).await.unwrap();
        drop(guard);

        assert!(matches!(pending.await, Err(AppError::NotFound(_))));
        assert!(store.list_recipe_ingredients(Some(&recipe_id)).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_row_is_not_created_for_ingredient_deleted_while_waiting() {
        let store = MemoryCatalog::new();
        let locks = Arc::new(RecipeLocks::new());
        let service = service_with_locks(&store, locks.clone());
        let recipe_id = recipe(&store, "Pogácsa").await;
        let flour_id = store.insert_ingredient(Ingredient::new("liszt".to_string())).await.unwrap().id.unwrap();

        let mut req = request(&recipe_id, "0.5");
        req.ingredient_id = Some(flour_id.to_hex());
        req.manual_ingredient_name = None;

        let guard = locks.lock(flour_id).await;
        let pending = service.create_row(req);
        futures_util::pin_mut!(pending);
        assert!(futures_util::poll!(&mut pending).is_pending());

        store.delete_for_ingredient(&flour_id).await.unwrap();
        store.delete_ingredient(&flour_id).await.unwrap();
        drop(guard);

        assert!(matches!(pending.await, Err(AppError::ValidationError(_))));
        assert!(store.list_recipe_ingredients(Some(&recipe_id)).await.unwrap().is_empty());
    }
}
