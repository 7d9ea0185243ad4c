//! Likert 评分类型实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "likert_rating_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub type_code: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub num_statements: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub statement_01: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub statement_02: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub statement_03: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub statement_04: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub statement_05: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub statement_06: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub statement_07: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub statement_08: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub statement_09: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub statement_10: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_likert_rating_type(self) -> crate::models::rating_types::entities::LikertRatingType {
        use crate::models::Status;
        use crate::models::rating_types::entities::LikertRatingType;

        LikertRatingType {
            id: self.id,
            type_code: self.type_code,
            description: self.description,
            num_statements: self.num_statements,
            statements: [
                self.statement_01,
                self.statement_02,
                self.statement_03,
                self.statement_04,
                self.statement_05,
                self.statement_06,
                self.statement_07,
                self.statement_08,
                self.statement_09,
                self.statement_10,
            ],
            status: self.status.parse::<Status>().unwrap_or(Status::Active),
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}

impl ActiveModel {
    /// 将陈述槽位写入 statement_01..statement_10 列
    pub fn set_statements(&mut self, slots: crate::models::rating_types::entities::StatementSlots) {
        use sea_orm::Set;

        let [s01, s02, s03, s04, s05, s06, s07, s08, s09, s10] = slots;
        self.statement_01 = Set(s01);
        self.statement_02 = Set(s02);
        self.statement_03 = Set(s03);
        self.statement_04 = Set(s04);
        self.statement_05 = Set(s05);
        self.statement_06 = Set(s06);
        self.statement_07 = Set(s07);
        self.statement_08 = Set(s08);
        self.statement_09 = Set(s09);
        self.statement_10 = Set(s10);
    }
}
