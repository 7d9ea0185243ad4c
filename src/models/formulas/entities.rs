use serde::{Deserialize, Serialize};

use crate::models::Status;

// 评分公式：把提交统计量映射为对外发布的汇总值
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingFormula {
    pub id: String,
    pub source_type: String,
    pub rating_type_id: String,
    // 算术表达式，如 "(sum / count) / 1"
    pub formula: String,
    pub status: Status,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
