use serde::Deserialize;

/// 创建评分请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRatingRequest {
    pub source_type: String,
    pub source_uid: String,
    pub rating_type_id: String,
    pub comment_allowed: Option<bool>,
}

// 存储层使用的内部创建参数（评分类型编码由服务层解析后填入）
#[derive(Debug, Clone)]
pub struct NewRating {
    pub source_type: String,
    pub source_uid: String,
    pub rating_type_id: String,
    pub rating_type_code: String,
    pub comment_allowed: bool,
}
