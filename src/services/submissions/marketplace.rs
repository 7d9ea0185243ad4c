//! 市场模式准入
//!
//! 评分按 (评分类型, 来源) 定位，不存在时自动创建；
//! 复合事务 ID 是唯一的判重依据。

use tracing::{debug, info};

use super::{SubmissionService, check_value, map_duplicate};
use crate::errors::{RatingError, Result};
use crate::models::submissions::{
    entities::{IdentityKey, NewSubmission},
    requests::MarketplaceSubmissionRequest,
    responses::{SubmissionResult, SubmittedRating},
};
use crate::services::notifications::{SubmissionEvent, dispatch_detached};
use crate::storage::SubmissionStore;

pub async fn admit_marketplace_submission(
    service: &SubmissionService,
    req: MarketplaceSubmissionRequest,
) -> Result<SubmissionResult> {
    let identity = IdentityKey::marketplace(
        &req.original_trans_id,
        &req.source_type,
        &req.source_uid,
        &req.user_id,
    );
    let trans_key = identity.trans_dedup_key().unwrap_or_default();

    match admit(service, &req, identity, &trans_key).await {
        Ok(result) => Ok(result),
        Err(e) => {
            debug!("市场提交被拒绝 ({}): {}", trans_key, e);
            Err(e)
        }
    }
}

async fn admit(
    service: &SubmissionService,
    req: &MarketplaceSubmissionRequest,
    identity: IdentityKey,
    trans_key: &str,
) -> Result<SubmissionResult> {
    let kind = service.catalog().resolve_kind(&req.rating_type_id).await?;
    let checked = check_value(&kind, &req.value)?;

    let store = service.store();
    if store
        .read("find_submission_by_trans_id", || {
            store.storage().find_submission_by_trans_id(trans_key)
        })
        .await?
        .is_some()
    {
        return Err(RatingError::user_rated(format!(
            "transaction {trans_key} has already been rated"
        )));
    }

    let rating = service
        .ratings()
        .find_or_create_rating(&kind, &req.source_type, &req.source_uid)
        .await?;

    let row = NewSubmission {
        rating_id: rating.id.clone(),
        rating_type_id: kind.id().to_string(),
        user_id: Some(req.user_id.clone()),
        user_id_legacy: None,
        value: checked.value.clone(),
        numeric_value: checked.numeric_value,
        comment: req.comment.clone(),
        source_trans_id: trans_key.to_string(),
        tagging: None,
        identity,
    };

    let ids = store
        .write("insert_submissions", store.storage().insert_submissions(vec![row]))
        .await
        .map_err(|e| map_duplicate(e, &format!("transaction {trans_key}")))?;

    let submissions: Vec<SubmittedRating> = ids
        .into_iter()
        .map(|id| SubmittedRating {
            id,
            rating_id: rating.id.clone(),
            value: checked.value.clone(),
            tagging: None,
        })
        .collect();

    info!(
        "用户 {} 对 {}/{} 提交了市场评分 {}",
        req.user_id, req.source_type, req.source_uid, checked.value
    );

    let mut events: Vec<SubmissionEvent> = submissions
        .iter()
        .map(|s| SubmissionEvent::RatingFlag {
            rating_id: s.rating_id.clone(),
            submission_id: s.id.clone(),
            source_trans_id: trans_key.to_string(),
            value: s.value.clone(),
        })
        .collect();
    if !req.media.is_empty() {
        events.push(SubmissionEvent::MediaCleanup {
            source_trans_id: trans_key.to_string(),
            media: req.media.clone(),
        });
    }
    dispatch_detached(service.notifier(), events);

    Ok(SubmissionResult {
        source_trans_id: trans_key.to_string(),
        submissions,
    })
}
