//! EvalSystem - 匿名教学评价平台后端服务
//!
//! 基于 Actix Web 构建的多租户学生匿名评教系统后端。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数
//!
//! # 核心不变量
//! 访问码是回复写入的唯一闸门：一个码至多换一条回复，竞争提交由
//! 数据库事务（行锁 + 唯一索引）仲裁，见 `storage::sea_orm_storage`。

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
