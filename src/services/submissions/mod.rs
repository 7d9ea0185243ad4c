pub mod classic;
pub mod manage;
pub mod marketplace;

use std::sync::Arc;

use crate::errors::{RatingError, Result};
use crate::models::rating_types::entities::RatingTypeKind;
use crate::models::submissions::{
    entities::RatingSubmission,
    requests::{MarketplaceSubmissionRequest, SubmitRatingsRequest, UpdateSubmissionRequest},
    responses::SubmissionResult,
};
use crate::services::guard::StoreGuard;
use crate::services::notifications::Notifier;
use crate::services::rating_types::RatingTypeService;
use crate::services::ratings::RatingService;
use crate::services::values;

/// 提交准入：分类 → 取值校验 → 判重 → 交叉标记 → 写入
#[derive(Clone)]
pub struct SubmissionService {
    store: StoreGuard,
    catalog: RatingTypeService,
    ratings: RatingService,
    notifier: Arc<dyn Notifier>,
}

impl SubmissionService {
    pub fn new(
        store: StoreGuard,
        catalog: RatingTypeService,
        ratings: RatingService,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            catalog,
            ratings,
            notifier,
        }
    }

    pub(crate) fn store(&self) -> &StoreGuard {
        &self.store
    }

    pub(crate) fn catalog(&self) -> &RatingTypeService {
        &self.catalog
    }

    pub(crate) fn ratings(&self) -> &RatingService {
        &self.ratings
    }

    pub(crate) fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    pub async fn admit_submission(&self, req: SubmitRatingsRequest) -> Result<SubmissionResult> {
        classic::admit_submission(self, req).await
    }

    pub async fn admit_marketplace_submission(
        &self,
        req: MarketplaceSubmissionRequest,
    ) -> Result<SubmissionResult> {
        marketplace::admit_marketplace_submission(self, req).await
    }

    pub async fn cancel_submission(&self, id: &str, reason: &str) -> Result<()> {
        manage::cancel_submission(self, id, reason).await
    }

    pub async fn update_submission_value(
        &self,
        id: &str,
        req: UpdateSubmissionRequest,
    ) -> Result<RatingSubmission> {
        manage::update_submission_value(self, id, req).await
    }
}

/// 校验通过的取值
#[derive(Debug, Clone)]
pub(crate) struct CheckedValue {
    // 写入存储的规范化取值
    pub value: String,
    // 数值类型的解析结果
    pub numeric_value: Option<f64>,
    // Likert 类型的选项
    pub selections: Vec<String>,
}

/// 按评分类型校验取值
pub(crate) fn check_value(kind: &RatingTypeKind, raw: &str) -> Result<CheckedValue> {
    match kind {
        RatingTypeKind::Numeric(t) => {
            let number = values::validate_numeric_submission(t, raw)?;
            Ok(CheckedValue {
                value: values::canonical_numeric_text(number, t.scale),
                numeric_value: Some(number),
                selections: Vec::new(),
            })
        }
        RatingTypeKind::Likert(t) => {
            let selections: Vec<String> = values::validate_likert_submission(t, raw)?
                .into_iter()
                .map(|seq| seq.to_string())
                .collect();
            Ok(CheckedValue {
                value: selections.join(","),
                numeric_value: None,
                selections,
            })
        }
    }
}

/// 唯一索引冲突即并发重复提交
pub(crate) fn map_duplicate(err: RatingError, identity: &str) -> RatingError {
    match err {
        RatingError::DuplicateKey(_) => {
            RatingError::user_rated(format!("{identity} has already been rated"))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_becomes_user_rated() {
        let err = map_duplicate(RatingError::duplicate_key("uq_rating_submissions_user_dedup"), "user U-1");
        assert_eq!(err.code(), "E201");
        assert!(err.message().contains("user U-1"));

        let err = map_duplicate(RatingError::storage_timeout("insert"), "user U-1");
        assert_eq!(err.code(), "E405");
    }

    #[test]
    fn test_numeric_value_is_stored_canonically() {
        let star = crate::models::rating_types::entities::NumericRatingType {
            id: "N".into(),
            type_code: "STAR".into(),
            description: None,
            min_score: 1,
            max_score: 5,
            scale: 0,
            intervals: 5,
            status: crate::models::Status::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let kind = RatingTypeKind::Numeric(star);
        for raw in ["4", "4.0", " 4.00 ", "+4"] {
            let checked = check_value(&kind, raw).unwrap();
            assert_eq!(checked.value, "4", "{raw}");
            assert_eq!(checked.numeric_value, Some(4.0));
        }
    }
}
