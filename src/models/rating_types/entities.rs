use serde::{Deserialize, Serialize};

use crate::models::Status;

/// 数值评分类型允许的最大精度（小数位数）
pub const MAX_SCALE: i32 = 2;

/// 数值评分类型合法取值个数的上限
pub const MAX_INTERVALS: i64 = 100_001;

/// Likert 评分类型最多支持的陈述数量
pub const LIKERT_MAX_STATEMENTS: usize = 10;

/// Likert 陈述槽位，下标 0 对应 statement_01
pub type StatementSlots = [Option<String>; LIKERT_MAX_STATEMENTS];

/// 按顺序构造陈述槽位，超出上限的部分被忽略
pub fn statement_slots(texts: &[&str]) -> StatementSlots {
    let mut slots = StatementSlots::default();
    for (slot, text) in slots.iter_mut().zip(texts) {
        *slot = Some((*text).to_string());
    }
    slots
}

// 数值评分类型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericRatingType {
    pub id: String,
    pub type_code: String,
    pub description: Option<String>,
    pub min_score: i64,
    pub max_score: i64,
    // 小数位数 0..=2
    pub scale: i32,
    // 合法取值个数 (max - min) * (scale + 1) + 1
    pub intervals: i64,
    pub status: Status,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Likert 评分类型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LikertRatingType {
    pub id: String,
    pub type_code: String,
    pub description: Option<String>,
    pub num_statements: i32,
    pub statements: StatementSlots,
    pub status: Status,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl LikertRatingType {
    /// 获取第 `seq` 条陈述（从 1 开始），空白文本视为未填写
    pub fn statement(&self, seq: usize) -> Option<&str> {
        if seq == 0 {
            return None;
        }
        self.statements
            .get(seq - 1)
            .and_then(|s| s.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// 评分类型（数值与 Likert 分表存储，读取时解析为标签联合）
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RatingTypeKind {
    Numeric(NumericRatingType),
    Likert(LikertRatingType),
}

impl RatingTypeKind {
    pub fn id(&self) -> &str {
        match self {
            RatingTypeKind::Numeric(t) => &t.id,
            RatingTypeKind::Likert(t) => &t.id,
        }
    }

    pub fn type_code(&self) -> &str {
        match self {
            RatingTypeKind::Numeric(t) => &t.type_code,
            RatingTypeKind::Likert(t) => &t.type_code,
        }
    }

    pub fn is_likert(&self) -> bool {
        matches!(self, RatingTypeKind::Likert(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            RatingTypeKind::Numeric(_) => "numeric",
            RatingTypeKind::Likert(_) => "likert",
        }
    }
}
