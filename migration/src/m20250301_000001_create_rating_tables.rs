use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 数值评分类型表
        manager
            .create_table(
                Table::create()
                    .table(NumericRatingTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NumericRatingTypes::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NumericRatingTypes::TypeCode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NumericRatingTypes::Description).text().null())
                    .col(
                        ColumnDef::new(NumericRatingTypes::MinScore)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NumericRatingTypes::MaxScore)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NumericRatingTypes::Scale).integer().not_null())
                    .col(
                        ColumnDef::new(NumericRatingTypes::Intervals)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NumericRatingTypes::Status).string().not_null())
                    .col(
                        ColumnDef::new(NumericRatingTypes::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NumericRatingTypes::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Likert 评分类型表（最多 10 条陈述）
        manager
            .create_table(
                Table::create()
                    .table(LikertRatingTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LikertRatingTypes::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LikertRatingTypes::TypeCode).string().not_null())
                    .col(ColumnDef::new(LikertRatingTypes::Description).text().null())
                    .col(
                        ColumnDef::new(LikertRatingTypes::NumStatements)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LikertRatingTypes::Statement01).text().null())
                    .col(ColumnDef::new(LikertRatingTypes::Statement02).text().null())
                    .col(ColumnDef::new(LikertRatingTypes::Statement03).text().null())
                    .col(ColumnDef::new(LikertRatingTypes::Statement04).text().null())
                    .col(ColumnDef::new(LikertRatingTypes::Statement05).text().null())
                    .col(ColumnDef::new(LikertRatingTypes::Statement06).text().null())
                    .col(ColumnDef::new(LikertRatingTypes::Statement07).text().null())
                    .col(ColumnDef::new(LikertRatingTypes::Statement08).text().null())
                    .col(ColumnDef::new(LikertRatingTypes::Statement09).text().null())
                    .col(ColumnDef::new(LikertRatingTypes::Statement10).text().null())
                    .col(ColumnDef::new(LikertRatingTypes::Status).string().not_null())
                    .col(
                        ColumnDef::new(LikertRatingTypes::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LikertRatingTypes::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 评分表
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ratings::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ratings::SourceType).string_len(128).not_null())
                    .col(ColumnDef::new(Ratings::SourceUid).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Ratings::RatingTypeId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Ratings::RatingTypeCode).string().not_null())
                    .col(ColumnDef::new(Ratings::Status).string().not_null())
                    .col(
                        ColumnDef::new(Ratings::CommentAllowed)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Ratings::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Ratings::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 评分公式表
        manager
            .create_table(
                Table::create()
                    .table(RatingFormulas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RatingFormulas::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RatingFormulas::SourceType)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RatingFormulas::RatingTypeId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RatingFormulas::Formula).text().not_null())
                    .col(ColumnDef::new(RatingFormulas::Status).string().not_null())
                    .col(
                        ColumnDef::new(RatingFormulas::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 评分提交表
        manager
            .create_table(
                Table::create()
                    .table(RatingSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RatingSubmissions::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RatingSubmissions::RatingId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RatingSubmissions::RatingTypeId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RatingSubmissions::UserId).string().null())
                    .col(
                        ColumnDef::new(RatingSubmissions::UserIdLegacy)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(RatingSubmissions::Value).text().not_null())
                    .col(ColumnDef::new(RatingSubmissions::NumericValue).double().null())
                    .col(ColumnDef::new(RatingSubmissions::Comment).text().null())
                    .col(
                        ColumnDef::new(RatingSubmissions::SourceTransId)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RatingSubmissions::Tagging).text().null())
                    .col(
                        ColumnDef::new(RatingSubmissions::UserDedupKey)
                            .string_len(512)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RatingSubmissions::LegacyDedupKey)
                            .string_len(512)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RatingSubmissions::TransDedupKey)
                            .string_len(512)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RatingSubmissions::Cancelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RatingSubmissions::CancelledReason)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RatingSubmissions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RatingSubmissions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RatingSubmissions::Table, RatingSubmissions::RatingId)
                            .to(Ratings::Table, Ratings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一索引：同一评分类型 + 来源只允许一个评分
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_ratings_type_source")
                    .table(Ratings::Table)
                    .col(Ratings::RatingTypeId)
                    .col(Ratings::SourceUid)
                    .col(Ratings::SourceType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 唯一索引：提交去重兜底（取消时清空，NULL 不参与冲突判断）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_rating_submissions_user_dedup")
                    .table(RatingSubmissions::Table)
                    .col(RatingSubmissions::UserDedupKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_rating_submissions_legacy_dedup")
                    .table(RatingSubmissions::Table)
                    .col(RatingSubmissions::LegacyDedupKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_rating_submissions_trans_dedup")
                    .table(RatingSubmissions::Table)
                    .col(RatingSubmissions::TransDedupKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 普通索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rating_submissions_rating_id")
                    .table(RatingSubmissions::Table)
                    .col(RatingSubmissions::RatingId)
                    .col(RatingSubmissions::Cancelled)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rating_submissions_rating_type_id")
                    .table(RatingSubmissions::Table)
                    .col(RatingSubmissions::RatingTypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rating_formulas_type_source")
                    .table(RatingFormulas::Table)
                    .col(RatingFormulas::RatingTypeId)
                    .col(RatingFormulas::SourceType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(RatingSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RatingFormulas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LikertRatingTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NumericRatingTypes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum NumericRatingTypes {
    Table,
    Id,
    TypeCode,
    Description,
    MinScore,
    MaxScore,
    Scale,
    Intervals,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LikertRatingTypes {
    Table,
    Id,
    TypeCode,
    Description,
    NumStatements,
    #[sea_orm(iden = "statement_01")]
    Statement01,
    #[sea_orm(iden = "statement_02")]
    Statement02,
    #[sea_orm(iden = "statement_03")]
    Statement03,
    #[sea_orm(iden = "statement_04")]
    Statement04,
    #[sea_orm(iden = "statement_05")]
    Statement05,
    #[sea_orm(iden = "statement_06")]
    Statement06,
    #[sea_orm(iden = "statement_07")]
    Statement07,
    #[sea_orm(iden = "statement_08")]
    Statement08,
    #[sea_orm(iden = "statement_09")]
    Statement09,
    #[sea_orm(iden = "statement_10")]
    Statement10,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    Id,
    SourceType,
    SourceUid,
    RatingTypeId,
    RatingTypeCode,
    Status,
    CommentAllowed,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RatingFormulas {
    Table,
    Id,
    SourceType,
    RatingTypeId,
    Formula,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum RatingSubmissions {
    Table,
    Id,
    RatingId,
    RatingTypeId,
    UserId,
    UserIdLegacy,
    Value,
    NumericValue,
    Comment,
    SourceTransId,
    Tagging,
    UserDedupKey,
    LegacyDedupKey,
    TransDedupKey,
    Cancelled,
    CancelledReason,
    CreatedAt,
    UpdatedAt,
}
