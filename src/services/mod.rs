pub mod formula;
pub mod formulas;
pub mod guard;
pub mod notifications;
pub mod rating_types;
pub mod ratings;
pub mod submissions;
pub mod summary;
pub mod values;

pub use formulas::FormulaService;
pub use guard::StoreGuard;
pub use rating_types::RatingTypeService;
pub use ratings::RatingService;
pub use submissions::SubmissionService;
pub use summary::SummaryService;

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::errors::Result;
use crate::models::submissions::{
    requests::{MarketplaceSubmissionRequest, SubmitRatingsRequest},
    responses::{LikertStatementSummary, NumericSummary, SubmissionResult},
};
use crate::storage::Storage;
use notifications::Notifier;

/// 评分引擎：对外暴露准入与汇总，管理操作通过各个服务访问
#[derive(Clone)]
pub struct RatingEngine {
    pub rating_types: RatingTypeService,
    pub ratings: RatingService,
    pub formulas: FormulaService,
    pub submissions: SubmissionService,
    pub summary: SummaryService,
}

impl RatingEngine {
    pub fn new(
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        config: &EngineConfig,
    ) -> Self {
        let store = StoreGuard::new(storage, config);
        let rating_types = RatingTypeService::new(store.clone());
        let ratings = RatingService::new(store.clone(), rating_types.clone());
        let formulas = FormulaService::new(store.clone(), rating_types.clone());
        let submissions = SubmissionService::new(
            store.clone(),
            rating_types.clone(),
            ratings.clone(),
            notifier,
        );
        let summary = SummaryService::new(store, rating_types.clone(), ratings.clone());

        Self {
            rating_types,
            ratings,
            formulas,
            submissions,
            summary,
        }
    }

    pub async fn admit_submission(&self, req: SubmitRatingsRequest) -> Result<SubmissionResult> {
        self.submissions.admit_submission(req).await
    }

    pub async fn admit_marketplace_submission(
        &self,
        req: MarketplaceSubmissionRequest,
    ) -> Result<SubmissionResult> {
        self.submissions.admit_marketplace_submission(req).await
    }

    pub async fn get_numeric_summary(
        &self,
        rating_id: &str,
        source_type: &str,
    ) -> Result<NumericSummary> {
        self.summary.get_numeric_summary(rating_id, source_type).await
    }

    pub async fn get_likert_summary(&self, rating_id: &str) -> Result<Vec<LikertStatementSummary>> {
        self.summary.get_likert_summary(rating_id).await
    }
}
