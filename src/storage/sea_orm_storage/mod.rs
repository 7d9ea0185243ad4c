//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod formulas;
mod rating_types;
mod ratings;
mod submissions;

use crate::config::DatabaseConfig;
use crate::errors::{RatingError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例并执行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| RatingError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| RatingError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| RatingError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| RatingError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 推断数据库类型：内存库、.db 文件路径，或带 sqlite/postgres/mysql scheme 的 URL
    fn build_database_url(url: &str) -> Result<String> {
        match url {
            ":memory:" | "sqlite::memory:" => Ok("sqlite::memory:".to_string()),
            path if path.ends_with(".db") && !path.contains("://") => {
                Ok(format!("sqlite://{path}?mode=rwc"))
            }
            _ => match url.split_once("://").map(|(scheme, _)| scheme) {
                Some("sqlite" | "postgres" | "postgresql" | "mysql") => Ok(url.to_string()),
                _ => Err(RatingError::database_config(format!(
                    "无法识别的数据库 URL: {url}，支持 sqlite://、postgres://、mysql:// 或 .db 文件路径"
                ))),
            },
        }
    }
}

/// 为数据库错误附加操作上下文，唯一索引冲突保留为 DuplicateKey
pub(crate) fn db_err(context: &'static str) -> impl Fn(DbErr) -> RatingError {
    move |e| match RatingError::from(e) {
        RatingError::DuplicateKey(detail) => {
            RatingError::duplicate_key(format!("{context}: {detail}"))
        }
        RatingError::DatabaseOperation(detail) => {
            RatingError::database_operation(format!("{context}: {detail}"))
        }
        other => other,
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// Storage trait 实现
use crate::models::{
    formulas::{entities::RatingFormula, requests::CreateFormulaRequest},
    rating_types::{
        entities::{LikertRatingType, NumericRatingType},
        requests::{
            CreateLikertRatingTypeRequest, CreateNumericRatingTypeRequest,
            UpdateLikertRatingTypeRequest, UpdateNumericRatingTypeRequest,
        },
    },
    ratings::{entities::Rating, requests::NewRating},
    submissions::entities::{NewSubmission, RatingSubmission, SumCount},
};
use crate::storage::{FormulaStore, RatingStore, RatingTypeStore, SubmissionStore};
use async_trait::async_trait;

#[async_trait]
impl RatingTypeStore for SeaOrmStorage {
    async fn get_numeric_rating_type_by_id(&self, id: &str) -> Result<Option<NumericRatingType>> {
        self.get_numeric_rating_type_by_id_impl(id).await
    }

    async fn get_likert_rating_type_by_id(&self, id: &str) -> Result<Option<LikertRatingType>> {
        self.get_likert_rating_type_by_id_impl(id).await
    }

    async fn create_numeric_rating_type(
        &self,
        req: CreateNumericRatingTypeRequest,
    ) -> Result<NumericRatingType> {
        self.create_numeric_rating_type_impl(req).await
    }

    async fn create_likert_rating_type(
        &self,
        req: CreateLikertRatingTypeRequest,
    ) -> Result<LikertRatingType> {
        self.create_likert_rating_type_impl(req).await
    }

    async fn update_numeric_rating_type(
        &self,
        id: &str,
        update: UpdateNumericRatingTypeRequest,
    ) -> Result<Option<NumericRatingType>> {
        self.update_numeric_rating_type_impl(id, update).await
    }

    async fn update_likert_rating_type(
        &self,
        id: &str,
        update: UpdateLikertRatingTypeRequest,
    ) -> Result<Option<LikertRatingType>> {
        self.update_likert_rating_type_impl(id, update).await
    }
}

#[async_trait]
impl RatingStore for SeaOrmStorage {
    async fn get_rating_by_id(&self, id: &str) -> Result<Option<Rating>> {
        self.get_rating_by_id_impl(id).await
    }

    async fn find_rating_by_type_source(
        &self,
        rating_type_id: &str,
        source_uid: &str,
        source_type: &str,
    ) -> Result<Option<Rating>> {
        self.find_rating_by_type_source_impl(rating_type_id, source_uid, source_type)
            .await
    }

    async fn create_rating(&self, rating: NewRating) -> Result<Rating> {
        self.create_rating_impl(rating).await
    }

    async fn count_ratings_by_type(&self, rating_type_id: &str) -> Result<i64> {
        self.count_ratings_by_type_impl(rating_type_id).await
    }
}

#[async_trait]
impl SubmissionStore for SeaOrmStorage {
    async fn find_submission_by_user(
        &self,
        rating_id: &str,
        user_id: Option<&str>,
        user_id_legacy: Option<i64>,
    ) -> Result<Option<RatingSubmission>> {
        self.find_submission_by_user_impl(rating_id, user_id, user_id_legacy)
            .await
    }

    async fn find_submission_by_trans_id(
        &self,
        source_trans_id: &str,
    ) -> Result<Option<RatingSubmission>> {
        self.find_submission_by_trans_id_impl(source_trans_id).await
    }

    async fn get_submission_by_id(&self, id: &str) -> Result<Option<RatingSubmission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn insert_submissions(&self, rows: Vec<NewSubmission>) -> Result<Vec<String>> {
        self.insert_submissions_impl(rows).await
    }

    async fn get_submission_sum_count(&self, rating_id: &str) -> Result<SumCount> {
        self.get_submission_sum_count_impl(rating_id).await
    }

    async fn count_submissions_by_value(&self, rating_id: &str, value: &str) -> Result<i64> {
        self.count_submissions_by_value_impl(rating_id, value).await
    }

    async fn list_active_submissions(&self, rating_id: &str) -> Result<Vec<RatingSubmission>> {
        self.list_active_submissions_impl(rating_id).await
    }

    async fn count_submissions_by_type(&self, rating_type_id: &str) -> Result<i64> {
        self.count_submissions_by_type_impl(rating_type_id).await
    }

    async fn cancel_submission(&self, id: &str, reason: &str) -> Result<bool> {
        self.cancel_submission_impl(id, reason).await
    }

    async fn update_submission_value(
        &self,
        id: &str,
        value: Option<String>,
        numeric_value: Option<f64>,
        comment: Option<String>,
    ) -> Result<Option<RatingSubmission>> {
        self.update_submission_value_impl(id, value, numeric_value, comment)
            .await
    }
}

#[async_trait]
impl FormulaStore for SeaOrmStorage {
    async fn get_active_formula(
        &self,
        rating_type_id: &str,
        source_type: &str,
    ) -> Result<Option<RatingFormula>> {
        self.get_active_formula_impl(rating_type_id, source_type)
            .await
    }

    async fn create_formula(&self, req: CreateFormulaRequest) -> Result<RatingFormula> {
        self.create_formula_impl(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("rating.db").unwrap(),
            "sqlite://rating.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/rating").unwrap(),
            "postgres://u:p@localhost/rating"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite://data/rating.db").unwrap(),
            "sqlite://data/rating.db"
        );
        let err = SeaOrmStorage::build_database_url("mongodb://localhost").unwrap_err();
        assert_eq!(err.code(), "E401");
        assert!(SeaOrmStorage::build_database_url("rating.sqlite3").is_err());
    }
}
