use serde::{Deserialize, Serialize};

use crate::models::Status;

// 评分：挂在某个业务实体 (source_type, source_uid) 上的一个评分维度
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub id: String,
    // 来源类型，如 doctor / product / store
    pub source_type: String,
    // 来源实体 ID
    pub source_uid: String,
    pub rating_type_id: String,
    pub rating_type_code: String,
    pub status: Status,
    pub comment_allowed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
