//! 评分类型存储操作

use super::{SeaOrmStorage, db_err, new_id};
use crate::entity::prelude::{
    LikertRatingTypeActiveModel as LikertActiveModel, LikertRatingTypes,
    NumericRatingTypeActiveModel as NumericActiveModel, NumericRatingTypes,
};
use crate::errors::Result;
use crate::models::rating_types::{
    entities::{LikertRatingType, NumericRatingType},
    requests::{
        CreateLikertRatingTypeRequest, CreateNumericRatingTypeRequest,
        UpdateLikertRatingTypeRequest, UpdateNumericRatingTypeRequest,
    },
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 通过 ID 获取数值评分类型
    pub async fn get_numeric_rating_type_by_id_impl(
        &self,
        id: &str,
    ) -> Result<Option<NumericRatingType>> {
        let result = NumericRatingTypes::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err("查询数值评分类型失败"))?;

        Ok(result.map(|m| m.into_numeric_rating_type()))
    }

    /// 通过 ID 获取 Likert 评分类型
    pub async fn get_likert_rating_type_by_id_impl(
        &self,
        id: &str,
    ) -> Result<Option<LikertRatingType>> {
        let result = LikertRatingTypes::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err("查询 Likert 评分类型失败"))?;

        Ok(result.map(|m| m.into_likert_rating_type()))
    }

    /// 创建数值评分类型
    pub async fn create_numeric_rating_type_impl(
        &self,
        req: CreateNumericRatingTypeRequest,
    ) -> Result<NumericRatingType> {
        let now = chrono::Utc::now().timestamp();

        let model = NumericActiveModel {
            id: Set(new_id()),
            type_code: Set(req.type_code),
            description: Set(req.description),
            min_score: Set(req.min_score),
            max_score: Set(req.max_score),
            scale: Set(req.scale),
            intervals: Set(req.intervals),
            status: Set(req.status.unwrap_or_default().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建数值评分类型失败"))?;

        Ok(result.into_numeric_rating_type())
    }

    /// 创建 Likert 评分类型
    pub async fn create_likert_rating_type_impl(
        &self,
        req: CreateLikertRatingTypeRequest,
    ) -> Result<LikertRatingType> {
        let now = chrono::Utc::now().timestamp();

        let mut model = LikertActiveModel {
            id: Set(new_id()),
            type_code: Set(req.type_code),
            description: Set(req.description),
            num_statements: Set(req.num_statements),
            status: Set(req.status.unwrap_or_default().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        model.set_statements(req.statements);

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建 Likert 评分类型失败"))?;

        Ok(result.into_likert_rating_type())
    }

    /// 更新数值评分类型
    pub async fn update_numeric_rating_type_impl(
        &self,
        id: &str,
        update: UpdateNumericRatingTypeRequest,
    ) -> Result<Option<NumericRatingType>> {
        // 先检查是否存在
        if self.get_numeric_rating_type_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = NumericActiveModel {
            id: Set(id.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(type_code) = update.type_code {
            model.type_code = Set(type_code);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(min_score) = update.min_score {
            model.min_score = Set(min_score);
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(scale) = update.scale {
            model.scale = Set(scale);
        }
        if let Some(intervals) = update.intervals {
            model.intervals = Set(intervals);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(db_err("更新数值评分类型失败"))?;

        Ok(Some(result.into_numeric_rating_type()))
    }

    /// 更新 Likert 评分类型
    pub async fn update_likert_rating_type_impl(
        &self,
        id: &str,
        update: UpdateLikertRatingTypeRequest,
    ) -> Result<Option<LikertRatingType>> {
        if self.get_likert_rating_type_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = LikertActiveModel {
            id: Set(id.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(type_code) = update.type_code {
            model.type_code = Set(type_code);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(num_statements) = update.num_statements {
            model.num_statements = Set(num_statements);
        }
        if let Some(statements) = update.statements {
            model.set_statements(statements);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(db_err("更新 Likert 评分类型失败"))?;

        Ok(Some(result.into_likert_rating_type()))
    }
}
