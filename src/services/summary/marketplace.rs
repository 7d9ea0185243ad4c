//! 市场模式数值汇总：使用存储端聚合的 {sum, count}

use super::SummaryService;
use crate::errors::Result;
use crate::models::submissions::responses::MarketplaceSummary;
use crate::services::formula::{self, PARAM_COUNT, PARAM_SUM};
use crate::storage::SubmissionStore;

pub async fn get_marketplace_summary(
    service: &SummaryService,
    rating_id: &str,
) -> Result<MarketplaceSummary> {
    let rating = service.rating(rating_id).await?;
    let formula = service
        .active_formula(&rating.rating_type_id, &rating.source_type)
        .await?;

    let store = service.store();
    let aggregate = store
        .read("get_submission_sum_count", || {
            store.storage().get_submission_sum_count(rating_id)
        })
        .await?;

    if aggregate.count == 0 {
        return Ok(MarketplaceSummary {
            rating_id: rating.id,
            value: formula::format_marketplace(0.0),
            total_reviewer: 0,
        });
    }

    let value = formula::evaluate(
        &formula.formula,
        &[
            (PARAM_SUM, aggregate.sum),
            (PARAM_COUNT, aggregate.count as f64),
        ],
    )?;

    Ok(MarketplaceSummary {
        rating_id: rating.id,
        value: formula::format_marketplace(value),
        total_reviewer: aggregate.count,
    })
}
