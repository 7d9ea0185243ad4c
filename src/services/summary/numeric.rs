//! 经典模式数值汇总：逐条读取未取消的提交，按整数累加后交给公式

use tracing::warn;

use super::SummaryService;
use crate::errors::Result;
use crate::models::ratings::entities::Rating;
use crate::models::submissions::{entities::RatingSubmission, responses::NumericSummary};
use crate::services::formula::{self, PARAM_TOTAL_RATING_POINT, PARAM_TOTAL_USER_COUNT};
use crate::storage::SubmissionStore;

pub async fn get_numeric_summary(
    service: &SummaryService,
    rating_id: &str,
    source_type: &str,
) -> Result<NumericSummary> {
    let rating = service.rating(rating_id).await?;
    summarize(service, &rating, source_type, |_| true).await
}

/// 只统计交叉标记指向给定 Likert 评分且包含给定选项的数值提交
pub async fn get_numeric_summary_by_tag(
    service: &SummaryService,
    rating_id: &str,
    source_type: &str,
    likert_rating_id: &str,
    likert_value: &str,
) -> Result<NumericSummary> {
    let rating = service.rating(rating_id).await?;
    let likert_value = likert_value.trim();
    summarize(service, &rating, source_type, |submission| {
        submission.tagging.as_ref().is_some_and(|tagging| {
            tagging.rating_id == likert_rating_id
                && tagging.value.iter().any(|v| v == likert_value)
        })
    })
    .await
}

pub(crate) async fn summarize<F>(
    service: &SummaryService,
    rating: &Rating,
    source_type: &str,
    include: F,
) -> Result<NumericSummary>
where
    F: Fn(&RatingSubmission) -> bool,
{
    let rating_id = rating.id.as_str();
    let formula = service
        .active_formula(&rating.rating_type_id, source_type)
        .await?;

    let store = service.store();
    let submissions = store
        .read("list_active_submissions", || {
            store.storage().list_active_submissions(rating_id)
        })
        .await?;

    let mut total_rating_point: i64 = 0;
    let mut total_user_count: i64 = 0;
    for submission in submissions.iter().filter(|s| include(s)) {
        match submission.value.trim().parse::<i64>() {
            Ok(point) => {
                total_rating_point += point;
                total_user_count += 1;
            }
            Err(_) => warn!(
                "提交 {} 的取值 '{}' 不是整数，已跳过",
                submission.id, submission.value
            ),
        }
    }

    if total_user_count == 0 {
        return Ok(NumericSummary {
            rating_id: rating.id.clone(),
            value: 0,
            total_reviewer: 0,
        });
    }

    let value = formula::evaluate(
        &formula.formula,
        &[
            (PARAM_TOTAL_RATING_POINT, total_rating_point as f64),
            (PARAM_TOTAL_USER_COUNT, total_user_count as f64),
        ],
    )?;

    Ok(NumericSummary {
        rating_id: rating.id.clone(),
        value: formula::round_classic(value),
        total_reviewer: total_user_count,
    })
}
