//! 评分管理

use tracing::{debug, info};

use crate::errors::{RatingError, Result};
use crate::models::rating_types::entities::RatingTypeKind;
use crate::models::ratings::{
    entities::Rating,
    requests::{CreateRatingRequest, NewRating},
};
use crate::services::guard::StoreGuard;
use crate::services::rating_types::RatingTypeService;
use crate::storage::RatingStore;

#[derive(Clone)]
pub struct RatingService {
    store: StoreGuard,
    catalog: RatingTypeService,
}

impl RatingService {
    pub fn new(store: StoreGuard, catalog: RatingTypeService) -> Self {
        Self { store, catalog }
    }

    pub async fn get_rating(&self, rating_id: &str) -> Result<Rating> {
        let store = &self.store;
        store
            .read("get_rating_by_id", || store.storage().get_rating_by_id(rating_id))
            .await?
            .ok_or_else(|| RatingError::rating_not_found(format!("rating {rating_id}")))
    }

    async fn find_by_type_source(
        &self,
        rating_type_id: &str,
        source_uid: &str,
        source_type: &str,
    ) -> Result<Option<Rating>> {
        let store = &self.store;
        store
            .read("find_rating_by_type_source", || {
                store
                    .storage()
                    .find_rating_by_type_source(rating_type_id, source_uid, source_type)
            })
            .await
    }

    /// 创建评分：评分类型必须存在，同一 (类型, 来源) 只能有一个评分
    pub async fn create_rating(&self, req: CreateRatingRequest) -> Result<Rating> {
        let kind = self.catalog.resolve_kind(&req.rating_type_id).await?;

        if self
            .find_by_type_source(&req.rating_type_id, &req.source_uid, &req.source_type)
            .await?
            .is_some()
        {
            debug!(
                "评分已存在: {} / {} / {}",
                req.rating_type_id, req.source_type, req.source_uid
            );
            return Err(rating_exists(&req.rating_type_id, &req.source_type, &req.source_uid));
        }

        let new_rating = NewRating {
            source_type: req.source_type,
            source_uid: req.source_uid,
            rating_type_id: req.rating_type_id,
            rating_type_code: kind.type_code().to_string(),
            comment_allowed: req.comment_allowed.unwrap_or(true),
        };
        let (type_id, source_type, source_uid) = (
            new_rating.rating_type_id.clone(),
            new_rating.source_type.clone(),
            new_rating.source_uid.clone(),
        );

        let store = &self.store;
        let rating = match store
            .write("create_rating", store.storage().create_rating(new_rating))
            .await
        {
            Ok(rating) => rating,
            Err(RatingError::DuplicateKey(_)) => {
                return Err(rating_exists(&type_id, &source_type, &source_uid));
            }
            Err(e) => return Err(e),
        };

        info!("创建 {} 评分 {} ({})", kind.name(), rating.id, rating.rating_type_code);
        Ok(rating)
    }

    /// 查找或创建评分（市场模式按 类型 + 来源 定位评分）
    ///
    /// 并发创建撞上唯一索引时重新读取胜出的那一行。
    pub async fn find_or_create_rating(
        &self,
        kind: &RatingTypeKind,
        source_type: &str,
        source_uid: &str,
    ) -> Result<Rating> {
        if let Some(rating) = self
            .find_by_type_source(kind.id(), source_uid, source_type)
            .await?
        {
            return Ok(rating);
        }

        let new_rating = NewRating {
            source_type: source_type.to_string(),
            source_uid: source_uid.to_string(),
            rating_type_id: kind.id().to_string(),
            rating_type_code: kind.type_code().to_string(),
            comment_allowed: true,
        };

        let store = &self.store;
        match store
            .write("create_rating", store.storage().create_rating(new_rating))
            .await
        {
            Ok(rating) => {
                info!("自动创建 {} 评分 {} ({})", kind.name(), rating.id, source_uid);
                Ok(rating)
            }
            Err(RatingError::DuplicateKey(_)) => self
                .find_by_type_source(kind.id(), source_uid, source_type)
                .await?
                .ok_or_else(|| {
                    RatingError::rating_not_found(format!(
                        "rating for {source_type}/{source_uid} vanished after concurrent create"
                    ))
                }),
            Err(e) => Err(e),
        }
    }
}

fn rating_exists(rating_type_id: &str, source_type: &str, source_uid: &str) -> RatingError {
    RatingError::rating_exists(format!(
        "rating type {rating_type_id} is already attached to {source_type}/{source_uid}"
    ))
}
