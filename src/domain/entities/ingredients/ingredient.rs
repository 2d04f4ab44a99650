use std::fmt;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 재료 마스터 데이터. `name`은 유니크합니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
}

impl Ingredient {
    pub fn new(name: String) -> Self {
        Self { id: None, name }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
