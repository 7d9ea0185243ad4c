//! 存储协作方接口
//!
//! 引擎只依赖这里的 trait。未找到统一返回 `Ok(None)`，存储故障返回 `Err`，
//! 两者必须可区分。

use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    formulas::{entities::RatingFormula, requests::CreateFormulaRequest},
    rating_types::{
        entities::{LikertRatingType, NumericRatingType},
        requests::{
            CreateLikertRatingTypeRequest, CreateNumericRatingTypeRequest,
            UpdateLikertRatingTypeRequest, UpdateNumericRatingTypeRequest,
        },
    },
    ratings::{entities::Rating, requests::NewRating},
    submissions::entities::{NewSubmission, RatingSubmission, SumCount},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait RatingTypeStore: Send + Sync {
    // 通过ID获取数值评分类型
    async fn get_numeric_rating_type_by_id(&self, id: &str) -> Result<Option<NumericRatingType>>;
    // 通过ID获取 Likert 评分类型
    async fn get_likert_rating_type_by_id(&self, id: &str) -> Result<Option<LikertRatingType>>;
    // 创建数值评分类型
    async fn create_numeric_rating_type(
        &self,
        req: CreateNumericRatingTypeRequest,
    ) -> Result<NumericRatingType>;
    // 创建 Likert 评分类型
    async fn create_likert_rating_type(
        &self,
        req: CreateLikertRatingTypeRequest,
    ) -> Result<LikertRatingType>;
    // 更新数值评分类型
    async fn update_numeric_rating_type(
        &self,
        id: &str,
        update: UpdateNumericRatingTypeRequest,
    ) -> Result<Option<NumericRatingType>>;
    // 更新 Likert 评分类型
    async fn update_likert_rating_type(
        &self,
        id: &str,
        update: UpdateLikertRatingTypeRequest,
    ) -> Result<Option<LikertRatingType>>;
}

#[async_trait::async_trait]
pub trait RatingStore: Send + Sync {
    // 通过ID获取评分
    async fn get_rating_by_id(&self, id: &str) -> Result<Option<Rating>>;
    // 通过评分类型 + 来源查找评分
    async fn find_rating_by_type_source(
        &self,
        rating_type_id: &str,
        source_uid: &str,
        source_type: &str,
    ) -> Result<Option<Rating>>;
    // 创建评分（唯一索引冲突返回 DuplicateKey）
    async fn create_rating(&self, rating: NewRating) -> Result<Rating>;
    // 统计引用某评分类型的评分数量
    async fn count_ratings_by_type(&self, rating_type_id: &str) -> Result<i64>;
}

#[async_trait::async_trait]
pub trait SubmissionStore: Send + Sync {
    // 经典模式：按 (rating_id, user_id) 或 (rating_id, user_id_legacy) 查找未取消的提交
    async fn find_submission_by_user(
        &self,
        rating_id: &str,
        user_id: Option<&str>,
        user_id_legacy: Option<i64>,
    ) -> Result<Option<RatingSubmission>>;
    // 市场模式：按复合事务 ID 查找未取消的提交
    async fn find_submission_by_trans_id(
        &self,
        source_trans_id: &str,
    ) -> Result<Option<RatingSubmission>>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: &str) -> Result<Option<RatingSubmission>>;
    // 写入提交，多行时在同一事务中全部成功或全部失败
    async fn insert_submissions(&self, rows: Vec<NewSubmission>) -> Result<Vec<String>>;
    // 存储端聚合未取消提交的 {sum, count}
    async fn get_submission_sum_count(&self, rating_id: &str) -> Result<SumCount>;
    // 统计取值与给定字符串完全相同的未取消提交
    async fn count_submissions_by_value(&self, rating_id: &str, value: &str) -> Result<i64>;
    // 列出未取消的提交
    async fn list_active_submissions(&self, rating_id: &str) -> Result<Vec<RatingSubmission>>;
    // 统计引用某评分类型的提交数量（含已取消）
    async fn count_submissions_by_type(&self, rating_type_id: &str) -> Result<i64>;
    // 逻辑删除提交，同时释放去重键
    async fn cancel_submission(&self, id: &str, reason: &str) -> Result<bool>;
    // 更新提交取值与评论
    async fn update_submission_value(
        &self,
        id: &str,
        value: Option<String>,
        numeric_value: Option<f64>,
        comment: Option<String>,
    ) -> Result<Option<RatingSubmission>>;
}

#[async_trait::async_trait]
pub trait FormulaStore: Send + Sync {
    // 获取评分类型 + 来源类型下的现行公式
    async fn get_active_formula(
        &self,
        rating_type_id: &str,
        source_type: &str,
    ) -> Result<Option<RatingFormula>>;
    // 创建公式并停用旧公式
    async fn create_formula(&self, req: CreateFormulaRequest) -> Result<RatingFormula>;
}

/// 引擎所需的全部存储能力
pub trait Storage: RatingTypeStore + RatingStore + SubmissionStore + FormulaStore {}

impl<T> Storage for T where T: RatingTypeStore + RatingStore + SubmissionStore + FormulaStore {}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
