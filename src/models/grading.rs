use crate::models::grade::Grade;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// 评分接口返回的结果
///
/// 只校验 `grade` / `red_flags` / `yellow_flags` 三个字段存在，其余字段原样保留
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingResult {
    pub grade: Grade,
    pub red_flags: Vec<String>,
    pub yellow_flags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl GradingResult {
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}
