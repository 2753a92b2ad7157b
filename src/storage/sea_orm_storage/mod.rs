//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 访问码消耗等跨行不变量全部由数据库事务与唯一约束保证，
//! 进程内不持有任何锁——多实例水平扩展时只有共享数据库能做串行化。

mod access_codes;
mod assignments;
mod classes;
mod evaluations;
mod responses;
mod schools;
mod subjects;
mod teachers;
mod users;

use crate::config::AppConfig;
use crate::errors::{EvalSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EvalSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EvalSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EvalSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EvalSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    access_codes::entities::AccessCode,
    classes::{
        entities::Class,
        requests::{AssignmentEntry, CreateClassRequest, UpdateClassRequest},
        responses::AssignmentDetail,
    },
    evaluations::{
        entities::{Evaluation, EvaluationResponse},
        requests::{
            CreateEvaluationRequest, EvaluationListQuery, SubmitResponseRequest,
            UpdateEvaluationRequest,
        },
        responses::{EvaluationListResponse, ResponseDetail},
    },
    schools::{
        entities::School,
        requests::{CreateSchoolRequest, SchoolListQuery, UpdateSchoolRequest},
        responses::SchoolListResponse,
    },
    subjects::entities::Subject,
    teachers::entities::Teacher,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学校模块
    async fn create_school(&self, school: CreateSchoolRequest) -> Result<School> {
        self.create_school_impl(school).await
    }

    async fn get_school_by_id(&self, school_id: i64) -> Result<Option<School>> {
        self.get_school_by_id_impl(school_id).await
    }

    async fn list_schools_with_pagination(
        &self,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse> {
        self.list_schools_with_pagination_impl(query).await
    }

    async fn update_school(
        &self,
        school_id: i64,
        update: UpdateSchoolRequest,
    ) -> Result<Option<School>> {
        self.update_school_impl(school_id, update).await
    }

    async fn delete_school(&self, school_id: i64) -> Result<bool> {
        self.delete_school_impl(school_id).await
    }

    // 教师模块
    async fn create_teacher(&self, school_id: i64, name: String) -> Result<Teacher> {
        self.create_teacher_impl(school_id, name).await
    }

    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(teacher_id).await
    }

    async fn list_teachers_by_school(&self, school_id: i64) -> Result<Vec<Teacher>> {
        self.list_teachers_by_school_impl(school_id).await
    }

    async fn update_teacher(&self, teacher_id: i64, name: String) -> Result<Option<Teacher>> {
        self.update_teacher_impl(teacher_id, name).await
    }

    async fn delete_teacher(&self, teacher_id: i64) -> Result<bool> {
        self.delete_teacher_impl(teacher_id).await
    }

    // 科目模块
    async fn create_subject(&self, school_id: i64, name: String) -> Result<Subject> {
        self.create_subject_impl(school_id, name).await
    }

    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(subject_id).await
    }

    async fn list_subjects_by_school(&self, school_id: i64) -> Result<Vec<Subject>> {
        self.list_subjects_by_school_impl(school_id).await
    }

    async fn update_subject(&self, subject_id: i64, name: String) -> Result<Option<Subject>> {
        self.update_subject_impl(subject_id, name).await
    }

    async fn delete_subject(&self, subject_id: i64) -> Result<bool> {
        self.delete_subject_impl(subject_id).await
    }

    // 班级模块
    async fn create_class(&self, school_id: i64, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(school_id, class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_by_school(&self, school_id: i64) -> Result<Vec<Class>> {
        self.list_classes_by_school_impl(school_id).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn school_has_open_evaluations(
        &self,
        school_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<bool> {
        self.school_has_open_evaluations_impl(school_id, now).await
    }

    // 任课分配模块
    async fn list_assignments_by_class(&self, class_id: i64) -> Result<Vec<AssignmentDetail>> {
        self.list_assignments_by_class_impl(class_id).await
    }

    async fn replace_assignments(
        &self,
        class_id: i64,
        assignments: Vec<AssignmentEntry>,
    ) -> Result<u64> {
        self.replace_assignments_impl(class_id, assignments).await
    }

    async fn delete_assignment(&self, class_id: i64, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(class_id, assignment_id).await
    }

    // 评价活动模块
    async fn create_evaluation(
        &self,
        school_id: i64,
        evaluation: CreateEvaluationRequest,
    ) -> Result<Evaluation> {
        self.create_evaluation_impl(school_id, evaluation).await
    }

    async fn get_evaluation_by_id(&self, evaluation_id: i64) -> Result<Option<Evaluation>> {
        self.get_evaluation_by_id_impl(evaluation_id).await
    }

    async fn list_evaluations_with_pagination(
        &self,
        query: EvaluationListQuery,
    ) -> Result<EvaluationListResponse> {
        self.list_evaluations_with_pagination_impl(query).await
    }

    async fn update_evaluation(
        &self,
        evaluation_id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<Evaluation>> {
        self.update_evaluation_impl(evaluation_id, update).await
    }

    async fn delete_evaluation(&self, evaluation_id: i64) -> Result<bool> {
        self.delete_evaluation_impl(evaluation_id).await
    }

    async fn count_responses(&self, evaluation_id: i64) -> Result<i64> {
        self.count_responses_impl(evaluation_id).await
    }

    async fn list_responses(&self, evaluation_id: i64) -> Result<Vec<EvaluationResponse>> {
        self.list_responses_impl(evaluation_id).await
    }

    async fn list_responses_with_names(&self, evaluation_id: i64) -> Result<Vec<ResponseDetail>> {
        self.list_responses_with_names_impl(evaluation_id).await
    }

    // 访问码模块
    async fn create_access_code(
        &self,
        evaluation_id: i64,
        class_name: String,
    ) -> Result<AccessCode> {
        self.create_access_code_impl(evaluation_id, class_name)
            .await
    }

    async fn get_access_code_by_code(&self, code: &str) -> Result<Option<AccessCode>> {
        self.get_access_code_by_code_impl(code).await
    }

    async fn get_access_code_by_id(&self, code_id: i64) -> Result<Option<AccessCode>> {
        self.get_access_code_by_id_impl(code_id).await
    }

    async fn list_access_codes_by_evaluation(&self, evaluation_id: i64) -> Result<Vec<AccessCode>> {
        self.list_access_codes_by_evaluation_impl(evaluation_id)
            .await
    }

    async fn delete_access_code(&self, code_id: i64) -> Result<bool> {
        self.delete_access_code_impl(code_id).await
    }

    async fn delete_access_codes_for_evaluation(&self, evaluation_id: i64) -> Result<u64> {
        self.delete_access_codes_for_evaluation_impl(evaluation_id)
            .await
    }

    async fn count_access_codes(&self, evaluation_id: i64) -> Result<(i64, i64)> {
        self.count_access_codes_impl(evaluation_id).await
    }

    // 核心提交事务
    async fn submit_response(
        &self,
        evaluation_id: i64,
        request: SubmitResponseRequest,
    ) -> Result<EvaluationResponse> {
        self.submit_response_impl(evaluation_id, request).await
    }
}
