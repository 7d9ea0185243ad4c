pub mod likert;
pub mod marketplace;
pub mod numeric;

use tracing::{debug, error};

use crate::errors::{ErrorKind, RatingError, Result};
use crate::models::formulas::entities::RatingFormula;
use crate::models::rating_types::entities::RatingTypeKind;
use crate::models::ratings::entities::Rating;
use crate::models::submissions::responses::{
    LikertStatementSummary, MarketplaceSummary, NumericSummary, RatingSummary,
};
use crate::services::guard::StoreGuard;
use crate::services::rating_types::RatingTypeService;
use crate::services::ratings::RatingService;
use crate::storage::FormulaStore;

/// 汇总计算：每次读取时从提交与公式重新计算，不缓存
#[derive(Clone)]
pub struct SummaryService {
    store: StoreGuard,
    catalog: RatingTypeService,
    ratings: RatingService,
}

impl SummaryService {
    pub fn new(store: StoreGuard, catalog: RatingTypeService, ratings: RatingService) -> Self {
        Self {
            store,
            catalog,
            ratings,
        }
    }

    pub(crate) fn store(&self) -> &StoreGuard {
        &self.store
    }

    pub(crate) fn catalog(&self) -> &RatingTypeService {
        &self.catalog
    }

    pub(crate) async fn rating(&self, rating_id: &str) -> Result<Rating> {
        self.ratings.get_rating(rating_id).await
    }

    /// 获取现行公式，没有则 `FormulaNotFound`
    pub(crate) async fn active_formula(
        &self,
        rating_type_id: &str,
        source_type: &str,
    ) -> Result<RatingFormula> {
        let store = &self.store;
        store
            .read("get_active_formula", || {
                store.storage().get_active_formula(rating_type_id, source_type)
            })
            .await?
            .ok_or_else(|| {
                RatingError::formula_not_found(format!(
                    "no active formula for rating type {rating_type_id} and source type {source_type}"
                ))
            })
    }

    pub async fn get_numeric_summary(
        &self,
        rating_id: &str,
        source_type: &str,
    ) -> Result<NumericSummary> {
        numeric::get_numeric_summary(self, rating_id, source_type)
            .await
            .inspect_err(|e| log_failure("numeric", rating_id, e))
    }

    pub async fn get_numeric_summary_by_tag(
        &self,
        rating_id: &str,
        source_type: &str,
        likert_rating_id: &str,
        likert_value: &str,
    ) -> Result<NumericSummary> {
        numeric::get_numeric_summary_by_tag(
            self,
            rating_id,
            source_type,
            likert_rating_id,
            likert_value,
        )
        .await
        .inspect_err(|e| log_failure("numeric_by_tag", rating_id, e))
    }

    pub async fn get_marketplace_summary(&self, rating_id: &str) -> Result<MarketplaceSummary> {
        marketplace::get_marketplace_summary(self, rating_id)
            .await
            .inspect_err(|e| log_failure("marketplace", rating_id, e))
    }

    pub async fn get_likert_summary(&self, rating_id: &str) -> Result<Vec<LikertStatementSummary>> {
        likert::get_likert_summary(self, rating_id)
            .await
            .inspect_err(|e| log_failure("likert", rating_id, e))
    }

    /// 按评分类型分派：能解析为 Likert 类型走逐项统计，否则走数值公式
    ///
    /// 评分类型只解析一次，随后传给具体的汇总路径。
    pub async fn get_summary(&self, rating_id: &str, source_type: &str) -> Result<RatingSummary> {
        self.dispatch(rating_id, source_type)
            .await
            .inspect_err(|e| log_failure("summary", rating_id, e))
    }

    async fn dispatch(&self, rating_id: &str, source_type: &str) -> Result<RatingSummary> {
        let rating = self.rating(rating_id).await?;
        match self.catalog.resolve_kind(&rating.rating_type_id).await? {
            RatingTypeKind::Likert(likert) => likert::summarize(self, &rating, &likert)
                .await
                .map(RatingSummary::Likert),
            RatingTypeKind::Numeric(_) => {
                numeric::summarize(self, &rating, source_type, |_| true)
                    .await
                    .map(RatingSummary::Numeric)
            }
        }
    }
}

// 聚合错误意味着管理端配置有误，与用户侧的校验失败分开记录
fn log_failure(path: &str, rating_id: &str, e: &RatingError) {
    match e.kind() {
        ErrorKind::Aggregation | ErrorKind::Storage | ErrorKind::Infrastructure => error!(
            target: "rating_engine::summary",
            code = e.code(),
            "{} 汇总不可用 (rating {}): {}",
            path,
            rating_id,
            e
        ),
        ErrorKind::Validation | ErrorKind::Admission => {
            debug!("{} 汇总请求被拒绝 (rating {}): {}", path, rating_id, e)
        }
    }
}
