use super::RatingTypeService;
use crate::errors::{RatingError, Result};
use crate::models::rating_types::entities::RatingTypeKind;
use crate::storage::RatingTypeStore;

/// 解析评分类型：先查 Likert 表，再查数值表，两者都没有则 `RatingTypeNotExist`
pub async fn resolve_kind(service: &RatingTypeService, rating_type_id: &str) -> Result<RatingTypeKind> {
    let store = service.store();

    if let Some(likert) = store
        .read("get_likert_rating_type_by_id", || {
            store.storage().get_likert_rating_type_by_id(rating_type_id)
        })
        .await?
    {
        return Ok(RatingTypeKind::Likert(likert));
    }

    store
        .read("get_numeric_rating_type_by_id", || {
            store.storage().get_numeric_rating_type_by_id(rating_type_id)
        })
        .await?
        .map(RatingTypeKind::Numeric)
        .ok_or_else(|| RatingError::rating_type_not_exist(format!("rating type {rating_type_id}")))
}
