//! 提交的取消与更新

use tracing::{debug, info};

use super::{SubmissionService, check_value};
use crate::errors::{RatingError, Result};
use crate::models::submissions::{entities::RatingSubmission, requests::UpdateSubmissionRequest};
use crate::storage::SubmissionStore;

async fn load_active(service: &SubmissionService, id: &str) -> Result<RatingSubmission> {
    let store = service.store();
    let submission = store
        .read("get_submission_by_id", || store.storage().get_submission_by_id(id))
        .await?
        .ok_or_else(|| RatingError::submission_not_found(format!("submission {id}")))?;

    if submission.cancelled {
        return Err(RatingError::submission_cancelled(format!(
            "submission {id} is already cancelled"
        )));
    }
    Ok(submission)
}

/// 逻辑删除提交，释放其去重键，之后同一身份可以重新提交
pub async fn cancel_submission(service: &SubmissionService, id: &str, reason: &str) -> Result<()> {
    load_active(service, id).await?;

    let store = service.store();
    let cancelled = store
        .write("cancel_submission", store.storage().cancel_submission(id, reason))
        .await?;
    if !cancelled {
        return Err(RatingError::submission_not_found(format!("submission {id}")));
    }

    info!("提交 {} 已取消: {}", id, reason);
    Ok(())
}

/// 更新取值与评论，取值按同样的规则重新校验；身份字段与交叉标记不变
pub async fn update_submission_value(
    service: &SubmissionService,
    id: &str,
    req: UpdateSubmissionRequest,
) -> Result<RatingSubmission> {
    let current = load_active(service, id).await?;

    let (value, numeric_value) = match &req.value {
        Some(raw) => {
            let rating = service.ratings().get_rating(&current.rating_id).await?;
            let kind = service.catalog().resolve_kind(&rating.rating_type_id).await?;
            let checked = check_value(&kind, raw).inspect_err(|e| {
                debug!("提交 {} 更新被拒绝: {}", id, e);
            })?;
            (Some(checked.value), checked.numeric_value)
        }
        None => (None, None),
    };

    let store = service.store();
    let updated = store
        .write(
            "update_submission_value",
            store
                .storage()
                .update_submission_value(id, value, numeric_value, req.comment),
        )
        .await?
        .ok_or_else(|| RatingError::submission_not_found(format!("submission {id}")))?;

    info!("提交 {} 已更新", id);
    Ok(updated)
}
