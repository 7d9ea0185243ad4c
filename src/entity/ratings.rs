//! 评分实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub source_type: String,
    pub source_uid: String,
    pub rating_type_id: String,
    pub rating_type_code: String,
    pub status: String,
    pub comment_allowed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rating_submissions::Entity")]
    Submissions,
}

impl Related<super::rating_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_rating(self) -> crate::models::ratings::entities::Rating {
        use crate::models::Status;
        use crate::models::ratings::entities::Rating;

        Rating {
            id: self.id,
            source_type: self.source_type,
            source_uid: self.source_uid,
            rating_type_id: self.rating_type_id,
            rating_type_code: self.rating_type_code,
            status: self.status.parse::<Status>().unwrap_or(Status::Active),
            comment_allowed: self.comment_allowed,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
