//! Recipe Entity
//!
//! 레시피 본문과 파생 필드인 `average_rating`을 담습니다.
//! `average_rating`은 평점 서비스의 재계산으로만 바뀌며, 사용자 입력으로는
//! [`RecipeDetails`]에 포함된 필드만 수정할 수 있습니다.

use std::fmt;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: Option<String>,
    /// 자유 형식의 조리 단계 (JSON)
    pub instructions: Option<serde_json::Value>,
    /// 준비 시간 (초)
    pub preparation_time: Option<u32>,
    /// 조리 시간 (초)
    pub cooking_time: Option<u32>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub category_ids: Vec<ObjectId>,
    pub youtube_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 사용자가 수정할 수 있는 레시피 필드 묶음
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDetails {
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<serde_json::Value>,
    pub preparation_time: Option<u32>,
    pub cooking_time: Option<u32>,
    pub category_ids: Vec<ObjectId>,
    pub youtube_url: Option<String>,
}

impl Recipe {
    /// 평점이 없는 새 레시피를 만듭니다.
    pub fn new(details: RecipeDetails) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            title: details.title,
            description: details.description,
            instructions: details.instructions,
            preparation_time: details.preparation_time,
            cooking_time: details.cooking_time,
            average_rating: 0.0,
            category_ids: dedup_ids(details.category_ids),
            youtube_url: details.youtube_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// 편집 가능한 필드를 덮어씁니다. `average_rating`은 유지됩니다.
    pub fn apply_details(&mut self, details: RecipeDetails) {
        self.title = details.title;
        self.description = details.description;
        self.instructions = details.instructions;
        self.preparation_time = details.preparation_time;
        self.cooking_time = details.cooking_time;
        self.category_ids = dedup_ids(details.category_ids);
        self.youtube_url = details.youtube_url;
        self.updated_at = Utc::now();
    }

    pub fn set_average_rating(&mut self, average_rating: f64) {
        self.average_rating = average_rating;
        self.updated_at = Utc::now();
    }

    /// 준비 시간과 조리 시간의 합 (초). 둘 다 없으면 `None`.
    pub fn total_time(&self) -> Option<u32> {
        match (self.preparation_time, self.cooking_time) {
            (None, None) => None,
            (prep, cook) => Some(prep.unwrap_or(0).saturating_add(cook.unwrap_or(0))),
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// 카테고리는 집합이므로 입력 순서를 유지하며 중복을 제거합니다.
fn dedup_ids(ids: Vec<ObjectId>) -> Vec<ObjectId> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
