//! 数值评分类型实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "numeric_rating_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub type_code: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub min_score: i64,
    pub max_score: i64,
    pub scale: i32,
    pub intervals: i64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_numeric_rating_type(
        self,
    ) -> crate::models::rating_types::entities::NumericRatingType {
        use crate::models::Status;
        use crate::models::rating_types::entities::NumericRatingType;

        NumericRatingType {
            id: self.id,
            type_code: self.type_code,
            description: self.description,
            min_score: self.min_score,
            max_score: self.max_score,
            scale: self.scale,
            intervals: self.intervals,
            status: self.status.parse::<Status>().unwrap_or(Status::Active),
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
