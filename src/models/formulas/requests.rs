use serde::Deserialize;

/// 创建评分公式请求（会替换同一评分类型 + 来源类型下的现行公式）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFormulaRequest {
    pub source_type: String,
    pub rating_type_id: String,
    pub formula: String,
}
