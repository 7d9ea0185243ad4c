use serde::{Deserialize, Serialize};

/// 复合键分隔符
pub const KEY_SEPARATOR: &str = "||";

// 交叉标记：数值提交对同一事务中 Likert 提交的弱引用（只保存 ID 与取值快照）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tagging {
    pub rating_id: String,
    pub value: Vec<String>,
}

// 评分提交
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingSubmission {
    pub id: String,
    pub rating_id: String,
    pub rating_type_id: String,
    pub user_id: Option<String>,
    pub user_id_legacy: Option<i64>,
    // 数值提交为数字文本，Likert 提交为逗号拼接的选项
    pub value: String,
    pub comment: Option<String>,
    pub source_trans_id: String,
    pub tagging: Option<Tagging>,
    pub cancelled: bool,
    pub cancelled_reason: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 提交身份键，决定重复提交的判定方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityKey {
    /// 经典模式：同一评分下 user_id 或 user_id_legacy 任一命中即视为重复
    User {
        rating_id: String,
        user_id: Option<String>,
        user_id_legacy: Option<i64>,
    },
    /// 市场模式：复合事务 ID 是唯一的判重依据
    Transaction(String),
}

impl IdentityKey {
    /// 构造市场模式身份键：original || source_type || source_uid || user_id
    pub fn marketplace(
        original_trans_id: &str,
        source_type: &str,
        source_uid: &str,
        user_id: &str,
    ) -> Self {
        IdentityKey::Transaction(
            [original_trans_id, source_type, source_uid, user_id].join(KEY_SEPARATOR),
        )
    }

    /// user_id 唯一索引列的值
    pub fn user_dedup_key(&self) -> Option<String> {
        match self {
            IdentityKey::User {
                rating_id,
                user_id: Some(user_id),
                ..
            } => Some(format!("{rating_id}{KEY_SEPARATOR}{user_id}")),
            _ => None,
        }
    }

    /// user_id_legacy 唯一索引列的值
    pub fn legacy_dedup_key(&self) -> Option<String> {
        match self {
            IdentityKey::User {
                rating_id,
                user_id_legacy: Some(legacy),
                ..
            } => Some(format!("{rating_id}{KEY_SEPARATOR}{legacy}")),
            _ => None,
        }
    }

    /// 市场模式事务键唯一索引列的值
    pub fn trans_dedup_key(&self) -> Option<String> {
        match self {
            IdentityKey::Transaction(key) => Some(key.clone()),
            IdentityKey::User { .. } => None,
        }
    }
}

// 待写入的提交（由准入流程构造）
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub rating_id: String,
    pub rating_type_id: String,
    pub user_id: Option<String>,
    pub user_id_legacy: Option<i64>,
    pub value: String,
    // 数值类型提交的解析结果，用于存储端聚合
    pub numeric_value: Option<f64>,
    pub comment: Option<String>,
    pub source_trans_id: String,
    pub tagging: Option<Tagging>,
    pub identity: IdentityKey,
}

// 存储端聚合结果
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SumCount {
    pub sum: f64,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketplace_key_composition() {
        let key = IdentityKey::marketplace("T-9", "store", "S-1", "U-7");
        assert_eq!(key, IdentityKey::Transaction("T-9||store||S-1||U-7".into()));
        assert_eq!(key.trans_dedup_key().as_deref(), Some("T-9||store||S-1||U-7"));
        assert_eq!(key.user_dedup_key(), None);
    }

    #[test]
    fn test_user_key_columns() {
        let key = IdentityKey::User {
            rating_id: "R1".into(),
            user_id: Some("U1".into()),
            user_id_legacy: Some(42),
        };
        assert_eq!(key.user_dedup_key().as_deref(), Some("R1||U1"));
        assert_eq!(key.legacy_dedup_key().as_deref(), Some("R1||42"));
        assert_eq!(key.trans_dedup_key(), None);
    }
}
