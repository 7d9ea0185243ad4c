use tracing::{debug, info};

use super::{RatingTypeService, rules};
use crate::errors::Result;
use crate::storage::RatingTypeStore;
use crate::models::rating_types::{
    entities::{LikertRatingType, NumericRatingType},
    requests::{CreateLikertRatingTypeRequest, CreateNumericRatingTypeRequest},
};

pub async fn create_numeric_rating_type(
    service: &RatingTypeService,
    req: CreateNumericRatingTypeRequest,
) -> Result<NumericRatingType> {
    if let Err(e) =
        rules::validate_numeric_definition(req.min_score, req.max_score, req.scale, req.intervals)
    {
        debug!("数值评分类型 {} 校验失败: {}", req.type_code, e);
        return Err(e);
    }

    let store = service.store();
    let created = store
        .write(
            "create_numeric_rating_type",
            store.storage().create_numeric_rating_type(req),
        )
        .await?;

    info!("创建数值评分类型 {} ({})", created.type_code, created.id);
    Ok(created)
}

pub async fn create_likert_rating_type(
    service: &RatingTypeService,
    req: CreateLikertRatingTypeRequest,
) -> Result<LikertRatingType> {
    if let Err(e) = rules::validate_likert_statements(req.num_statements, &req.statements) {
        debug!("Likert 评分类型 {} 校验失败: {}", req.type_code, e);
        return Err(e);
    }

    let store = service.store();
    let created = store
        .write(
            "create_likert_rating_type",
            store.storage().create_likert_rating_type(req),
        )
        .await?;

    info!("创建 Likert 评分类型 {} ({})", created.type_code, created.id);
    Ok(created)
}
