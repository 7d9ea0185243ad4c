use tracing::{debug, info};

use super::{RatingTypeService, rules};
use crate::errors::{RatingError, Result};
use crate::storage::{RatingStore, RatingTypeStore, SubmissionStore};
use crate::models::rating_types::{
    entities::{LikertRatingType, NumericRatingType},
    requests::{UpdateLikertRatingTypeRequest, UpdateNumericRatingTypeRequest},
};

/// 探测依赖：是否已有评分引用该类型、是否已有提交
async fn probe_dependents(service: &RatingTypeService, id: &str) -> Result<(bool, bool)> {
    let store = service.store();
    let ratings = store
        .read("count_ratings_by_type", || {
            store.storage().count_ratings_by_type(id)
        })
        .await?;
    let submissions = store
        .read("count_submissions_by_type", || {
            store.storage().count_submissions_by_type(id)
        })
        .await?;
    Ok((ratings > 0, submissions > 0))
}

pub async fn update_numeric_rating_type(
    service: &RatingTypeService,
    id: &str,
    update: UpdateNumericRatingTypeRequest,
) -> Result<NumericRatingType> {
    let store = service.store();
    let current = store
        .read("get_numeric_rating_type_by_id", || {
            store.storage().get_numeric_rating_type_by_id(id)
        })
        .await?
        .ok_or_else(|| RatingError::rating_type_not_exist(format!("numeric rating type {id}")))?;

    let (has_rating, has_submission) = probe_dependents(service, id).await?;
    let checked = rules::validate_numeric_update(&current, &update, has_rating, has_submission)
        .and_then(|_| rules::validate_numeric(&rules::apply_numeric_patch(&current, &update)));
    if let Err(e) = checked {
        debug!("数值评分类型 {} 更新被拒绝: {}", id, e);
        return Err(e);
    }

    let updated = store
        .write(
            "update_numeric_rating_type",
            store.storage().update_numeric_rating_type(id, update),
        )
        .await?
        .ok_or_else(|| RatingError::rating_type_not_exist(format!("numeric rating type {id}")))?;

    info!("更新数值评分类型 {}", id);
    Ok(updated)
}

pub async fn update_likert_rating_type(
    service: &RatingTypeService,
    id: &str,
    update: UpdateLikertRatingTypeRequest,
) -> Result<LikertRatingType> {
    let store = service.store();
    let current = store
        .read("get_likert_rating_type_by_id", || {
            store.storage().get_likert_rating_type_by_id(id)
        })
        .await?
        .ok_or_else(|| RatingError::rating_type_not_exist(format!("likert rating type {id}")))?;

    let (has_rating, has_submission) = probe_dependents(service, id).await?;
    let checked = rules::validate_likert_update(&current, &update, has_rating, has_submission)
        .and_then(|_| {
            rules::validate_likert_statement_count(&rules::apply_likert_patch(&current, &update))
        });
    if let Err(e) = checked {
        debug!("Likert 评分类型 {} 更新被拒绝: {}", id, e);
        return Err(e);
    }

    let updated = store
        .write(
            "update_likert_rating_type",
            store.storage().update_likert_rating_type(id, update),
        )
        .await?
        .ok_or_else(|| RatingError::rating_type_not_exist(format!("likert rating type {id}")))?;

    info!("更新 Likert 评分类型 {}", id);
    Ok(updated)
}
