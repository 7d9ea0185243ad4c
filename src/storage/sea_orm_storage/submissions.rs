//! 评分提交存储操作

use super::{SeaOrmStorage, db_err, new_id};
use crate::entity::rating_submissions::{ActiveModel, Column, Entity as RatingSubmissions};
use crate::errors::{RatingError, Result};
use crate::models::submissions::entities::{NewSubmission, RatingSubmission, SumCount};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 经典模式：按用户查找未取消的提交
    pub async fn find_submission_by_user_impl(
        &self,
        rating_id: &str,
        user_id: Option<&str>,
        user_id_legacy: Option<i64>,
    ) -> Result<Option<RatingSubmission>> {
        let mut identity = Condition::any();
        if let Some(user_id) = user_id {
            identity = identity.add(Column::UserId.eq(user_id));
        }
        if let Some(legacy) = user_id_legacy {
            identity = identity.add(Column::UserIdLegacy.eq(legacy));
        }
        // 没有任何身份信息时不做判重
        if user_id.is_none() && user_id_legacy.is_none() {
            return Ok(None);
        }

        let result = RatingSubmissions::find()
            .filter(Column::RatingId.eq(rating_id))
            .filter(Column::Cancelled.eq(false))
            .filter(identity)
            .one(&self.db)
            .await
            .map_err(db_err("查询用户提交失败"))?;

        Ok(result.map(|m| m.into_rating_submission()))
    }

    /// 市场模式：按复合事务 ID 查找未取消的提交
    pub async fn find_submission_by_trans_id_impl(
        &self,
        source_trans_id: &str,
    ) -> Result<Option<RatingSubmission>> {
        let result = RatingSubmissions::find()
            .filter(Column::SourceTransId.eq(source_trans_id))
            .filter(Column::Cancelled.eq(false))
            .one(&self.db)
            .await
            .map_err(db_err("查询事务提交失败"))?;

        Ok(result.map(|m| m.into_rating_submission()))
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: &str) -> Result<Option<RatingSubmission>> {
        let result = RatingSubmissions::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err("查询提交失败"))?;

        Ok(result.map(|m| m.into_rating_submission()))
    }

    /// 写入提交
    ///
    /// 单行直接写入；多行在同一事务中写入，任一行失败时整批回滚。
    pub async fn insert_submissions_impl(&self, rows: Vec<NewSubmission>) -> Result<Vec<String>> {
        let now = chrono::Utc::now().timestamp();
        let mut models = Vec::with_capacity(rows.len());
        for row in rows {
            models.push(Self::build_submission_model(row, now)?);
        }

        if models.len() <= 1 {
            let mut ids = Vec::with_capacity(1);
            if let Some(model) = models.pop() {
                ids.push(Self::insert_submission_model(&self.db, model).await?);
            }
            return Ok(ids);
        }

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;
        let mut ids = Vec::with_capacity(models.len());
        for model in models {
            // 出错时 txn 被 drop，自动回滚
            ids.push(Self::insert_submission_model(&txn, model).await?);
        }
        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(ids)
    }

    fn build_submission_model(row: NewSubmission, now: i64) -> Result<ActiveModel> {
        let tagging = row
            .tagging
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(RatingError::from)?;

        Ok(ActiveModel {
            id: Set(new_id()),
            rating_id: Set(row.rating_id),
            rating_type_id: Set(row.rating_type_id),
            user_id: Set(row.user_id),
            user_id_legacy: Set(row.user_id_legacy),
            value: Set(row.value),
            numeric_value: Set(row.numeric_value),
            comment: Set(row.comment),
            source_trans_id: Set(row.source_trans_id),
            tagging: Set(tagging),
            user_dedup_key: Set(row.identity.user_dedup_key()),
            legacy_dedup_key: Set(row.identity.legacy_dedup_key()),
            trans_dedup_key: Set(row.identity.trans_dedup_key()),
            cancelled: Set(false),
            cancelled_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    async fn insert_submission_model<C>(conn: &C, model: ActiveModel) -> Result<String>
    where
        C: ConnectionTrait,
    {
        let inserted = model.insert(conn).await.map_err(db_err("写入提交失败"))?;
        Ok(inserted.id)
    }

    /// 存储端聚合未取消数值提交的 {sum, count}
    pub async fn get_submission_sum_count_impl(&self, rating_id: &str) -> Result<SumCount> {
        let sum: Option<Option<f64>> = RatingSubmissions::find()
            .select_only()
            .column_as(Column::NumericValue.sum(), "sum")
            .filter(Column::RatingId.eq(rating_id))
            .filter(Column::Cancelled.eq(false))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(db_err("聚合提交分数失败"))?;

        let count = RatingSubmissions::find()
            .filter(Column::RatingId.eq(rating_id))
            .filter(Column::Cancelled.eq(false))
            .filter(Column::NumericValue.is_not_null())
            .count(&self.db)
            .await
            .map_err(db_err("统计提交数量失败"))?;

        Ok(SumCount {
            sum: sum.flatten().unwrap_or(0.0),
            count: count as i64,
        })
    }

    /// 统计取值与给定字符串完全相同的未取消提交
    pub async fn count_submissions_by_value_impl(
        &self,
        rating_id: &str,
        value: &str,
    ) -> Result<i64> {
        let count = RatingSubmissions::find()
            .filter(Column::RatingId.eq(rating_id))
            .filter(Column::Cancelled.eq(false))
            .filter(Column::Value.eq(value))
            .count(&self.db)
            .await
            .map_err(db_err("统计提交数量失败"))?;

        Ok(count as i64)
    }

    /// 列出未取消的提交
    pub async fn list_active_submissions_impl(
        &self,
        rating_id: &str,
    ) -> Result<Vec<RatingSubmission>> {
        let rows = RatingSubmissions::find()
            .filter(Column::RatingId.eq(rating_id))
            .filter(Column::Cancelled.eq(false))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err("查询提交列表失败"))?;

        Ok(rows.into_iter().map(|m| m.into_rating_submission()).collect())
    }

    /// 统计引用某评分类型的提交数量（含已取消）
    pub async fn count_submissions_by_type_impl(&self, rating_type_id: &str) -> Result<i64> {
        let count = RatingSubmissions::find()
            .filter(Column::RatingTypeId.eq(rating_type_id))
            .count(&self.db)
            .await
            .map_err(db_err("统计提交数量失败"))?;

        Ok(count as i64)
    }

    /// 逻辑删除提交并释放去重键
    pub async fn cancel_submission_impl(&self, id: &str, reason: &str) -> Result<bool> {
        let Some(existing) = RatingSubmissions::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err("查询提交失败"))?
        else {
            return Ok(false);
        };

        let mut model: ActiveModel = existing.into();
        model.cancelled = Set(true);
        model.cancelled_reason = Set(Some(reason.to_string()));
        model.user_dedup_key = Set(None);
        model.legacy_dedup_key = Set(None);
        model.trans_dedup_key = Set(None);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(db_err("取消提交失败"))?;

        Ok(true)
    }

    /// 更新提交取值与评论
    pub async fn update_submission_value_impl(
        &self,
        id: &str,
        value: Option<String>,
        numeric_value: Option<f64>,
        comment: Option<String>,
    ) -> Result<Option<RatingSubmission>> {
        let Some(existing) = RatingSubmissions::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err("查询提交失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(value) = value {
            model.value = Set(value);
            model.numeric_value = Set(numeric_value);
        }
        if let Some(comment) = comment {
            model.comment = Set(Some(comment));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(db_err("更新提交失败"))?;

        Ok(Some(result.into_rating_submission()))
    }
}
