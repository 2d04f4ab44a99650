//! Recipe Ingredient Entity
//!
//! 레시피와 재료 사이의 연결 행입니다. 재료 마스터를 참조하거나
//! 마스터에 없는 재료를 `manual_ingredient_name`으로 직접 적을 수 있습니다.

use bigdecimal::{BigDecimal, Signed};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};
use crate::core::errors::{AppError, AppResult};
use super::unit::Unit;

/// 수량의 최대 전체 자릿수
pub const QUANTITY_MAX_DIGITS: u64 = 8;
/// 수량의 최대 소수 자릿수
pub const QUANTITY_DECIMAL_PLACES: i64 = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredient {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub recipe_id: ObjectId,
    pub ingredient_id: Option<ObjectId>,
    pub manual_ingredient_name: Option<String>,
    /// 항상 소수 둘째 자리 스케일로 저장됩니다.
    #[serde(serialize_with = "serialize_quantity")]
    pub quantity: BigDecimal,
    #[serde(default)]
    pub unit: Unit,
    pub comments: Option<String>,
}

impl RecipeIngredient {
    /// 불변식을 검사한 뒤 행을 생성합니다.
    ///
    /// - `ingredient_id` 또는 비어 있지 않은 `manual_ingredient_name` 중 하나는 있어야 합니다.
    /// - 수량은 음수가 아니며 8자리, 소수 2자리 이내여야 합니다.
    pub fn new(
        recipe_id: ObjectId,
        ingredient_id: Option<ObjectId>,
        manual_ingredient_name: Option<String>,
        quantity: BigDecimal,
        unit: Unit,
        comments: Option<String>,
    ) -> AppResult<Self> {
        let manual_ingredient_name = manual_ingredient_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        if ingredient_id.is_none() && manual_ingredient_name.is_none() {
            return Err(AppError::ValidationError(
                "재료를 선택하거나 재료 이름을 직접 입력해야 합니다".to_string(),
            ));
        }

        Ok(Self {
            id: None,
            recipe_id,
            ingredient_id,
            manual_ingredient_name,
            quantity: checked_quantity(quantity)?,
            unit,
            comments,
        })
    }

    /// 표시용 문자열: `"{수량} {단위 라벨} {이름}"`. 직접 입력한 이름이 우선합니다.
    ///
    /// `ingredient_name`은 참조된 재료 마스터의 이름입니다.
    pub fn describe(&self, ingredient_name: Option<&str>) -> String {
        let name = self
            .manual_ingredient_name
            .as_deref()
            .or(ingredient_name)
            .unwrap_or_default();

        format!("{} {} {}", format_quantity(&self.quantity), self.unit.label(), name).trim_end().to_string()
    }
}

/// 수량을 `"0.00"` 형태의 고정 소수 둘째 자리 문자열로 씁니다.
///
/// `BigDecimal`의 `Display`는 0을 스케일과 무관하게 `"0"`으로 쓰므로 `to_plain_string`을 사용합니다.
pub fn format_quantity(quantity: &BigDecimal) -> String {
    quantity.with_scale(QUANTITY_DECIMAL_PLACES).to_plain_string()
}

/// serde `serialize_with`용 수량 직렬화기
pub fn serialize_quantity<S: Serializer>(quantity: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_quantity(quantity))
}

/// 수량 정밀도를 검사하고 소수 둘째 자리 스케일로 맞춥니다.
///
/// 자릿수는 정규화된 가수와 지수로만 판단하고, 통과한 값만 `with_scale`로 확장합니다.
/// `1e100000000`처럼 지수가 큰 입력은 확장 전에 거부되며, 오류 메시지에 값을 펼치지 않습니다.
///
/// # 인자
///
/// * `quantity` - 요청에서 파싱된 수량
///
/// # 반환값
///
/// 스케일 2의 수량. 음수, 소수 3자리 이상, 정수부 6자리 초과면 `ValidationError`
///
/// # 예제
///
/// ```rust,ignore
/// let scaled = checked_quantity(BigDecimal::from_str("2.5")?)?;
/// assert_eq!(scaled.to_string(), "2.50");
/// ```
pub fn checked_quantity(quantity: BigDecimal) -> AppResult<BigDecimal> {
    if quantity.is_negative() {
        return Err(AppError::ValidationError("수량은 음수일 수 없습니다".to_string()));
    }

    let (mantissa, scale) = quantity.normalized().as_bigint_and_exponent();
    if scale > QUANTITY_DECIMAL_PLACES {
        return Err(AppError::ValidationError(format!(
            "수량은 소수점 이하 {}자리까지 입력할 수 있습니다",
            QUANTITY_DECIMAL_PLACES
        )));
    }

    let integer_digits = mantissa.magnitude().to_string().len() as i64 - scale;
    if integer_digits > QUANTITY_MAX_DIGITS as i64 - QUANTITY_DECIMAL_PLACES {
        return Err(AppError::ValidationError(format!(
            "수량은 전체 {}자리를 넘을 수 없습니다",
            QUANTITY_MAX_DIGITS
        )));
    }

    Ok(quantity.with_scale(QUANTITY_DECIMAL_PLACES))
}
