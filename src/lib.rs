//! Rating Engine - 评分类型校验、提交准入与汇总计算
//!
//! 为任意业务实体（医生、商品、门店等）挂载数值或 Likert 评分，
//! 收集用户提交并按公式或逐项统计发布汇总值。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（目录、取值校验、准入、公式、汇总、通知）
//! - `storage`: 数据存储层（SeaORM）

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
