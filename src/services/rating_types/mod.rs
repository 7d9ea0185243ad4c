pub mod create;
pub mod resolve;
pub mod rules;
pub mod update;

use crate::errors::Result;
use crate::models::rating_types::{
    entities::{LikertRatingType, NumericRatingType, RatingTypeKind},
    requests::{
        CreateLikertRatingTypeRequest, CreateNumericRatingTypeRequest,
        UpdateLikertRatingTypeRequest, UpdateNumericRatingTypeRequest,
    },
};
use crate::services::guard::StoreGuard;

/// 评分类型目录：数值与 Likert 两类定义的校验、存储与解析
#[derive(Clone)]
pub struct RatingTypeService {
    store: StoreGuard,
}

impl RatingTypeService {
    pub fn new(store: StoreGuard) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &StoreGuard {
        &self.store
    }

    pub async fn create_numeric_rating_type(
        &self,
        req: CreateNumericRatingTypeRequest,
    ) -> Result<NumericRatingType> {
        create::create_numeric_rating_type(self, req).await
    }

    pub async fn create_likert_rating_type(
        &self,
        req: CreateLikertRatingTypeRequest,
    ) -> Result<LikertRatingType> {
        create::create_likert_rating_type(self, req).await
    }

    pub async fn update_numeric_rating_type(
        &self,
        id: &str,
        update: UpdateNumericRatingTypeRequest,
    ) -> Result<NumericRatingType> {
        update::update_numeric_rating_type(self, id, update).await
    }

    pub async fn update_likert_rating_type(
        &self,
        id: &str,
        update: UpdateLikertRatingTypeRequest,
    ) -> Result<LikertRatingType> {
        update::update_likert_rating_type(self, id, update).await
    }

    pub async fn resolve_kind(&self, rating_type_id: &str) -> Result<RatingTypeKind> {
        resolve::resolve_kind(self, rating_type_id).await
    }
}
