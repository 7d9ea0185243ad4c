//! 评分公式实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rating_formulas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub source_type: String,
    pub rating_type_id: String,
    #[sea_orm(column_type = "Text")]
    pub formula: String,
    pub status: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_rating_formula(self) -> crate::models::formulas::entities::RatingFormula {
        use crate::models::Status;
        use crate::models::formulas::entities::RatingFormula;

        RatingFormula {
            id: self.id,
            source_type: self.source_type,
            rating_type_id: self.rating_type_id,
            formula: self.formula,
            status: self.status.parse::<Status>().unwrap_or(Status::Inactive),
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
