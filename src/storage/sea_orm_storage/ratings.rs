//! 评分存储操作

use super::{SeaOrmStorage, db_err, new_id};
use crate::entity::ratings::{ActiveModel, Column, Entity as Ratings};
use crate::errors::Result;
use crate::models::{
    Status,
    ratings::{entities::Rating, requests::NewRating},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 通过 ID 获取评分
    pub async fn get_rating_by_id_impl(&self, id: &str) -> Result<Option<Rating>> {
        let result = Ratings::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err("查询评分失败"))?;

        Ok(result.map(|m| m.into_rating()))
    }

    /// 通过评分类型 + 来源查找评分
    pub async fn find_rating_by_type_source_impl(
        &self,
        rating_type_id: &str,
        source_uid: &str,
        source_type: &str,
    ) -> Result<Option<Rating>> {
        let result = Ratings::find()
            .filter(Column::RatingTypeId.eq(rating_type_id))
            .filter(Column::SourceUid.eq(source_uid))
            .filter(Column::SourceType.eq(source_type))
            .one(&self.db)
            .await
            .map_err(db_err("查询评分失败"))?;

        Ok(result.map(|m| m.into_rating()))
    }

    /// 创建评分
    pub async fn create_rating_impl(&self, rating: NewRating) -> Result<Rating> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(new_id()),
            source_type: Set(rating.source_type),
            source_uid: Set(rating.source_uid),
            rating_type_id: Set(rating.rating_type_id),
            rating_type_code: Set(rating.rating_type_code),
            status: Set(Status::Active.to_string()),
            comment_allowed: Set(rating.comment_allowed),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建评分失败"))?;

        Ok(result.into_rating())
    }

    /// 统计引用某评分类型的评分数量
    pub async fn count_ratings_by_type_impl(&self, rating_type_id: &str) -> Result<i64> {
        let count = Ratings::find()
            .filter(Column::RatingTypeId.eq(rating_type_id))
            .count(&self.db)
            .await
            .map_err(db_err("查询评分数量失败"))?;

        Ok(count as i64)
    }
}
