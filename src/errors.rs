//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称与错误分类。
//!
//! 错误分类决定对调用方暴露的信息量：校验与准入错误返回完整详情（例如合法取值列表），
//! 聚合与存储错误只返回不透明的失败信息，详情仅写入日志。

use std::fmt;

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 评分类型定义或提交值不合法
    Validation,
    /// 提交准入冲突（重复提交、评分不存在等）
    Admission,
    /// 汇总计算失败，通常意味着管理端配置错误
    Aggregation,
    /// 存储层故障或超时
    Storage,
    /// 配置、通知等基础设施错误
    Infrastructure,
}

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - kind() 方法 - 返回错误分类
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_rating_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $kind:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum RatingError {
            $($variant(String),)*
        }

        impl RatingError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(RatingError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(RatingError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误分类
            pub fn kind(&self) -> ErrorKind {
                match self {
                    $(RatingError::$variant(_) => ErrorKind::$kind,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(RatingError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl RatingError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        RatingError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_rating_errors! {
    // 评分类型 / 取值校验
    InvalidScale("E101", "Invalid Scale", Validation),
    ScaleOutOfRange("E102", "Scale Out Of Range", Validation),
    MinNotLessThanMax("E103", "Min Not Less Than Max", Validation),
    IntervalMismatch("E104", "Interval Mismatch", Validation),
    NumStatementsMismatch("E105", "Num Statements Mismatch", Validation),
    FieldFrozen("E106", "Field Frozen", Validation),
    NotParsable("E107", "Value Not Parsable", Validation),
    OutOfSet("E108", "Value Out Of Set", Validation),
    OutOfRange("E109", "Value Out Of Range", Validation),
    TooManySubmissions("E110", "Too Many Submissions", Validation),
    // 提交准入
    UserRated("E201", "User Already Rated", Admission),
    RatingTypeNotExist("E202", "Rating Type Not Exist", Admission),
    RatingNotFound("E203", "Rating Not Found", Admission),
    RatingExists("E204", "Rating Already Exists", Admission),
    SubmissionNotFound("E205", "Submission Not Found", Admission),
    SubmissionCancelled("E206", "Submission Cancelled", Admission),
    // 汇总计算
    FormulaNotFound("E301", "Formula Not Found", Aggregation),
    FormulaParse("E302", "Formula Parse Error", Aggregation),
    FormulaEval("E303", "Formula Evaluation Error", Aggregation),
    MissingFormula("E304", "Missing Formula", Aggregation),
    InvalidStatementValue("E305", "Invalid Statement Value", Aggregation),
    // 存储
    DatabaseConfig("E401", "Database Configuration Error", Storage),
    DatabaseConnection("E402", "Database Connection Error", Storage),
    DatabaseOperation("E403", "Database Operation Error", Storage),
    DuplicateKey("E404", "Duplicate Key", Storage),
    StorageTimeout("E405", "Storage Timeout", Storage),
    // 基础设施
    Configuration("E501", "Configuration Error", Infrastructure),
    Serialization("E502", "Serialization Error", Infrastructure),
    Notification("E503", "Notification Error", Infrastructure),
    NotifierPluginNotFound("E504", "Notifier Plugin Not Found", Infrastructure),
}

impl RatingError {
    /// 是否可直接展示给终端用户（可据此自行修正请求）
    pub fn is_user_facing(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::Admission)
    }

    /// 对外展示的错误信息，聚合/存储错误不泄露内部细节
    pub fn public_message(&self) -> String {
        if self.is_user_facing() {
            self.format_simple()
        } else {
            format!("{}: failed", self.error_type())
        }
    }

    /// 是否为存储层故障（仅此类错误允许对幂等读重试）
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            RatingError::DatabaseConnection(_)
                | RatingError::DatabaseOperation(_)
                | RatingError::StorageTimeout(_)
        )
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for RatingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RatingError {}

// 唯一索引冲突单独映射，便于上层转换为业务错误
impl From<sea_orm::DbErr> for RatingError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                RatingError::DuplicateKey(detail)
            }
            _ => RatingError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RatingError {
    fn from(err: serde_json::Error) -> Self {
        RatingError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for RatingError {
    fn from(err: config::ConfigError) -> Self {
        RatingError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RatingError>;
