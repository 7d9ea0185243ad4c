//! Likert 汇总：逐条陈述统计取值恰好等于该序号的提交数

use super::SummaryService;
use crate::errors::{RatingError, Result};
use crate::models::rating_types::entities::{LikertRatingType, RatingTypeKind};
use crate::models::ratings::entities::Rating;
use crate::models::submissions::responses::LikertStatementSummary;
use crate::storage::SubmissionStore;

pub async fn get_likert_summary(
    service: &SummaryService,
    rating_id: &str,
) -> Result<Vec<LikertStatementSummary>> {
    let rating = service.rating(rating_id).await?;
    match service.catalog().resolve_kind(&rating.rating_type_id).await? {
        RatingTypeKind::Likert(likert) => summarize(service, &rating, &likert).await,
        RatingTypeKind::Numeric(numeric) => Err(RatingError::rating_type_not_exist(format!(
            "rating {rating_id} uses numeric rating type {}, not a Likert type",
            numeric.id
        ))),
    }
}

/// 对已解析出 Likert 类型的评分逐项统计
pub(crate) async fn summarize(
    service: &SummaryService,
    rating: &Rating,
    likert: &LikertRatingType,
) -> Result<Vec<LikertStatementSummary>> {
    let rating_id = rating.id.as_str();
    let store = service.store();
    let mut summary = Vec::with_capacity(likert.num_statements.max(0) as usize);
    for seq in 1..=likert.num_statements {
        let text = likert.statement(seq as usize).ok_or_else(|| {
            RatingError::invalid_statement_value(format!(
                "statement_{seq:02} of Likert type {} is empty",
                likert.id
            ))
        })?;

        let value = seq.to_string();
        let total_reviewer = store
            .read("count_submissions_by_value", || {
                store.storage().count_submissions_by_value(rating_id, &value)
            })
            .await?;

        summary.push(LikertStatementSummary {
            seq_id: seq,
            value: text.to_string(),
            total_reviewer,
        });
    }

    Ok(summary)
}
