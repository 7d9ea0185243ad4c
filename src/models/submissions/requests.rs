use serde::Deserialize;

// 单个评分的取值
#[derive(Debug, Clone, Deserialize)]
pub struct RatingValueInput {
    pub rating_id: String,
    pub value: String,
}

/// 经典模式提交请求（一次请求可同时提交数值与 Likert 评分）
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRatingsRequest {
    pub user_id: Option<String>,
    pub user_id_legacy: Option<i64>,
    // 调用方的原始事务 ID
    pub source_trans_id: String,
    pub comment: Option<String>,
    // 已上传媒体的标识，提交成功后通知外部清理临时文件
    #[serde(default)]
    pub media: Vec<String>,
    pub ratings: Vec<RatingValueInput>,
}

/// 市场模式提交请求（按评分类型 + 来源解析评分）
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceSubmissionRequest {
    pub rating_type_id: String,
    pub source_type: String,
    pub source_uid: String,
    pub user_id: String,
    pub original_trans_id: String,
    pub value: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub media: Vec<String>,
}

/// 更新提交请求（身份字段不可修改）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubmissionRequest {
    pub value: Option<String>,
    pub comment: Option<String>,
}
