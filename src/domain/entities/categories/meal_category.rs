use std::fmt;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 식사 카테고리 (예: 아침, 디저트). `name`은 1-50자이며 유니크합니다.
///
/// 레시피와는 `Recipe::category_ids`를 통한 다대다 관계입니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealCategory {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
}

impl MealCategory {
    pub fn new(name: String) -> Self {
        Self { id: None, name }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
