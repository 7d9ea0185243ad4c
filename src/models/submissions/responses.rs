use serde::Serialize;

use crate::models::submissions::entities::Tagging;

/// 已写入的单条提交
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmittedRating {
    pub id: String,
    pub rating_id: String,
    pub value: String,
    pub tagging: Option<Tagging>,
}

/// 提交准入结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmissionResult {
    pub source_trans_id: String,
    pub submissions: Vec<SubmittedRating>,
}

/// 经典模式数值汇总
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NumericSummary {
    pub rating_id: String,
    pub value: i64,
    pub total_reviewer: i64,
}

/// 市场模式数值汇总（一位小数的定点字符串）
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarketplaceSummary {
    pub rating_id: String,
    pub value: String,
    pub total_reviewer: i64,
}

/// Likert 单条陈述的统计
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LikertStatementSummary {
    pub seq_id: i32,
    pub value: String,
    pub total_reviewer: i64,
}

/// 按评分类型分派后的汇总
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", content = "summary", rename_all = "snake_case")]
pub enum RatingSummary {
    Numeric(NumericSummary),
    Likert(Vec<LikertStatementSummary>),
}
