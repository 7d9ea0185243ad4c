//! 评分公式存储操作

use super::{SeaOrmStorage, db_err, new_id};
use crate::entity::rating_formulas::{ActiveModel, Column, Entity as RatingFormulas};
use crate::errors::Result;
use crate::models::{
    Status,
    formulas::{entities::RatingFormula, requests::CreateFormulaRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 获取现行公式
    pub async fn get_active_formula_impl(
        &self,
        rating_type_id: &str,
        source_type: &str,
    ) -> Result<Option<RatingFormula>> {
        let result = RatingFormulas::find()
            .filter(Column::RatingTypeId.eq(rating_type_id))
            .filter(Column::SourceType.eq(source_type))
            .filter(Column::Status.eq(Status::ACTIVE))
            .order_by_desc(Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(db_err("查询评分公式失败"))?;

        Ok(result.map(|m| m.into_rating_formula()))
    }

    /// 创建公式（同一事务内停用旧公式，保证只有一个现行公式）
    pub async fn create_formula_impl(&self, req: CreateFormulaRequest) -> Result<RatingFormula> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        RatingFormulas::update_many()
            .col_expr(Column::Status, Expr::value(Status::INACTIVE))
            .filter(Column::RatingTypeId.eq(req.rating_type_id.as_str()))
            .filter(Column::SourceType.eq(req.source_type.as_str()))
            .filter(Column::Status.eq(Status::ACTIVE))
            .exec(&txn)
            .await
            .map_err(db_err("停用旧评分公式失败"))?;

        let model = ActiveModel {
            id: Set(new_id()),
            source_type: Set(req.source_type),
            rating_type_id: Set(req.rating_type_id),
            formula: Set(req.formula),
            status: Set(Status::Active.to_string()),
            created_at: Set(now),
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(db_err("创建评分公式失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(result.into_rating_formula())
    }
}
