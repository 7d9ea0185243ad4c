//! 经典模式准入
//!
//! 一次请求最多包含一个数值评分和一个 Likert 评分，共享同一个原始事务 ID。
//! 两者同时出现时，数值提交携带指向 Likert 提交的交叉标记。所有行作为一个整体写入。

use tracing::{debug, info};

use super::{CheckedValue, SubmissionService, check_value, map_duplicate};
use crate::errors::{RatingError, Result};
use crate::models::rating_types::entities::RatingTypeKind;
use crate::models::ratings::entities::Rating;
use crate::models::submissions::{
    entities::{IdentityKey, KEY_SEPARATOR, NewSubmission, Tagging},
    requests::SubmitRatingsRequest,
    responses::{SubmissionResult, SubmittedRating},
};
use crate::services::notifications::{SubmissionEvent, dispatch_detached};
use crate::storage::SubmissionStore;

// 已分类并通过校验的单个评分
struct Classified {
    rating: Rating,
    kind: RatingTypeKind,
    checked: CheckedValue,
}

fn describe_user(req: &SubmitRatingsRequest) -> String {
    match (&req.user_id, req.user_id_legacy) {
        (Some(user_id), _) => format!("user {user_id}"),
        (None, Some(legacy)) => format!("user #{legacy}"),
        (None, None) => "anonymous user".to_string(),
    }
}

pub async fn admit_submission(
    service: &SubmissionService,
    req: SubmitRatingsRequest,
) -> Result<SubmissionResult> {
    match admit(service, &req).await {
        Ok(result) => Ok(result),
        Err(e) => {
            debug!(
                "提交被拒绝 (trans {}, {}): {}",
                req.source_trans_id,
                describe_user(&req),
                e
            );
            Err(e)
        }
    }
}

async fn admit(service: &SubmissionService, req: &SubmitRatingsRequest) -> Result<SubmissionResult> {
    if req.ratings.is_empty() {
        return Err(RatingError::not_parsable("no ratings submitted"));
    }
    if req.ratings.len() > 2 {
        return Err(RatingError::too_many_submissions(format!(
            "at most one numeric and one Likert rating per transaction, got {}",
            req.ratings.len()
        )));
    }

    // 分类 + 取值校验
    let mut numeric: Option<Classified> = None;
    let mut likert: Option<Classified> = None;
    for input in &req.ratings {
        let rating = service.ratings().get_rating(&input.rating_id).await?;
        let kind = service.catalog().resolve_kind(&rating.rating_type_id).await?;
        let checked = check_value(&kind, &input.value)?;

        let slot = if kind.is_likert() {
            &mut likert
        } else {
            &mut numeric
        };
        if slot.is_some() {
            return Err(RatingError::too_many_submissions(format!(
                "more than one {} rating in transaction {}",
                kind.name(),
                req.source_trans_id
            )));
        }
        *slot = Some(Classified {
            rating,
            kind,
            checked,
        });
    }

    // 判重：任一评分已被该用户提交过则整体拒绝
    let store = service.store();
    for entry in numeric.iter().chain(likert.iter()) {
        let rating_id = entry.rating.id.as_str();
        let existing = store
            .read("find_submission_by_user", || {
                store.storage().find_submission_by_user(
                    rating_id,
                    req.user_id.as_deref(),
                    req.user_id_legacy,
                )
            })
            .await?;
        if existing.is_some() {
            return Err(RatingError::user_rated(format!(
                "{} has already rated {}",
                describe_user(req),
                rating_id
            )));
        }
    }

    // 交叉标记只写在数值提交上
    let tagging = match (&numeric, &likert) {
        (Some(_), Some(l)) => Some(Tagging {
            rating_id: l.rating.id.clone(),
            value: l.checked.selections.clone(),
        }),
        _ => None,
    };

    let mut rows = Vec::with_capacity(2);
    for (entry, tagging) in [(numeric, tagging), (likert, None)] {
        if let Some(entry) = entry {
            rows.push(new_row(req, entry, tagging));
        }
    }

    let identity = describe_user(req);
    let planned: Vec<(String, String, Option<Tagging>)> = rows
        .iter()
        .map(|r| (r.rating_id.clone(), r.value.clone(), r.tagging.clone()))
        .collect();
    let ids = store
        .write("insert_submissions", store.storage().insert_submissions(rows))
        .await
        .map_err(|e| map_duplicate(e, &identity))?;

    let submissions: Vec<SubmittedRating> = ids
        .into_iter()
        .zip(planned)
        .map(|(id, (rating_id, value, tagging))| SubmittedRating {
            id,
            rating_id,
            value,
            tagging,
        })
        .collect();

    info!(
        "{} 提交了 {} 条评分 (trans {})",
        identity,
        submissions.len(),
        req.source_trans_id
    );

    notify(service, req, &submissions);

    Ok(SubmissionResult {
        source_trans_id: req.source_trans_id.clone(),
        submissions,
    })
}

fn new_row(req: &SubmitRatingsRequest, entry: Classified, tagging: Option<Tagging>) -> NewSubmission {
    let rating_id = entry.rating.id;
    NewSubmission {
        source_trans_id: format!("{rating_id}{KEY_SEPARATOR}{}", req.source_trans_id),
        identity: IdentityKey::User {
            rating_id: rating_id.clone(),
            user_id: req.user_id.clone(),
            user_id_legacy: req.user_id_legacy,
        },
        rating_type_id: entry.kind.id().to_string(),
        user_id: req.user_id.clone(),
        user_id_legacy: req.user_id_legacy,
        value: entry.checked.value,
        numeric_value: entry.checked.numeric_value,
        comment: req.comment.clone(),
        tagging,
        rating_id,
    }
}

fn notify(service: &SubmissionService, req: &SubmitRatingsRequest, submissions: &[SubmittedRating]) {
    let mut events: Vec<SubmissionEvent> = submissions
        .iter()
        .map(|s| SubmissionEvent::RatingFlag {
            rating_id: s.rating_id.clone(),
            submission_id: s.id.clone(),
            source_trans_id: req.source_trans_id.clone(),
            value: s.value.clone(),
        })
        .collect();
    if !req.media.is_empty() {
        events.push(SubmissionEvent::MediaCleanup {
            source_trans_id: req.source_trans_id.clone(),
            media: req.media.clone(),
        });
    }
    dispatch_detached(service.notifier(), events);
}
