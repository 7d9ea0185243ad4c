//! 评分提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rating_submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub rating_id: String,
    pub rating_type_id: String,
    pub user_id: Option<String>,
    pub user_id_legacy: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub value: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub numeric_value: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub source_trans_id: String,
    // JSON 序列化的交叉标记
    #[sea_orm(column_type = "Text", nullable)]
    pub tagging: Option<String>,
    // 去重键，取消时清空
    #[sea_orm(unique)]
    pub user_dedup_key: Option<String>,
    #[sea_orm(unique)]
    pub legacy_dedup_key: Option<String>,
    #[sea_orm(unique)]
    pub trans_dedup_key: Option<String>,
    pub cancelled: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub cancelled_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ratings::Entity",
        from = "Column::RatingId",
        to = "super::ratings::Column::Id"
    )]
    Rating,
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rating.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_rating_submission(
        self,
    ) -> crate::models::submissions::entities::RatingSubmission {
        use crate::models::submissions::entities::{RatingSubmission, Tagging};

        // 标记列损坏时按未标记处理
        let tagging = self
            .tagging
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Tagging>(raw).ok());

        RatingSubmission {
            id: self.id,
            rating_id: self.rating_id,
            rating_type_id: self.rating_type_id,
            user_id: self.user_id,
            user_id_legacy: self.user_id_legacy,
            value: self.value,
            comment: self.comment,
            source_trans_id: self.source_trans_id,
            tagging,
            cancelled: self.cancelled,
            cancelled_reason: self.cancelled_reason,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
