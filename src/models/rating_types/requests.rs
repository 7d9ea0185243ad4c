use serde::Deserialize;

use crate::models::Status;
use crate::models::rating_types::entities::StatementSlots;

/// 创建数值评分类型请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNumericRatingTypeRequest {
    pub type_code: String,
    pub description: Option<String>,
    pub min_score: i64,
    pub max_score: i64,
    pub scale: i32,
    pub intervals: i64,
    pub status: Option<Status>,
}

/// 更新数值评分类型请求（仅包含需要修改的字段）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNumericRatingTypeRequest {
    pub type_code: Option<String>,
    pub description: Option<String>,
    pub min_score: Option<i64>,
    pub max_score: Option<i64>,
    pub scale: Option<i32>,
    pub intervals: Option<i64>,
    pub status: Option<Status>,
}

/// 创建 Likert 评分类型请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLikertRatingTypeRequest {
    pub type_code: String,
    pub description: Option<String>,
    pub num_statements: i32,
    #[serde(default)]
    pub statements: StatementSlots,
    pub status: Option<Status>,
}

/// 更新 Likert 评分类型请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLikertRatingTypeRequest {
    pub type_code: Option<String>,
    pub description: Option<String>,
    pub num_statements: Option<i32>,
    pub statements: Option<StatementSlots>,
    pub status: Option<Status>,
}
