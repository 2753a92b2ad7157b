use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段此时已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 学校管理方法
    async fn create_school(&self, school: CreateSchoolRequest) -> Result<School>;
    async fn get_school_by_id(&self, school_id: i64) -> Result<Option<School>>;
    async fn list_schools_with_pagination(
        &self,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse>;
    async fn update_school(
        &self,
        school_id: i64,
        update: UpdateSchoolRequest,
    ) -> Result<Option<School>>;
    async fn delete_school(&self, school_id: i64) -> Result<bool>;

    /// 教师管理方法（被评价对象，按学校隔离）
    async fn create_teacher(&self, school_id: i64, name: String) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_by_school(&self, school_id: i64) -> Result<Vec<Teacher>>;
    async fn update_teacher(&self, teacher_id: i64, name: String) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, teacher_id: i64) -> Result<bool>;

    /// 科目管理方法（按学校隔离）
    async fn create_subject(&self, school_id: i64, name: String) -> Result<Subject>;
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_by_school(&self, school_id: i64) -> Result<Vec<Subject>>;
    async fn update_subject(&self, subject_id: i64, name: String) -> Result<Option<Subject>>;
    async fn delete_subject(&self, subject_id: i64) -> Result<bool>;

    /// 班级管理方法（按学校隔离）
    async fn create_class(&self, school_id: i64, class: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    async fn list_classes_by_school(&self, school_id: i64) -> Result<Vec<Class>>;
    async fn update_class(&self, class_id: i64, update: UpdateClassRequest)
    -> Result<Option<Class>>;
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 学校是否存在未结束的评价活动（删除班级前的守卫）
    async fn school_has_open_evaluations(
        &self,
        school_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<bool>;

    /// 任课分配方法
    async fn list_assignments_by_class(&self, class_id: i64) -> Result<Vec<AssignmentDetail>>;
    // 批量替换班级的任课分配（事务内先删后插）
    async fn replace_assignments(
        &self,
        class_id: i64,
        assignments: Vec<AssignmentEntry>,
    ) -> Result<u64>;
    async fn delete_assignment(&self, class_id: i64, assignment_id: i64) -> Result<bool>;

    /// 评价活动管理方法
    async fn create_evaluation(
        &self,
        school_id: i64,
        evaluation: CreateEvaluationRequest,
    ) -> Result<Evaluation>;
    async fn get_evaluation_by_id(&self, evaluation_id: i64) -> Result<Option<Evaluation>>;
    async fn list_evaluations_with_pagination(
        &self,
        query: EvaluationListQuery,
    ) -> Result<EvaluationListResponse>;
    async fn update_evaluation(
        &self,
        evaluation_id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<Evaluation>>;
    async fn delete_evaluation(&self, evaluation_id: i64) -> Result<bool>;
    // 评价活动的回复总数（删除/修改守卫与统计共用）
    async fn count_responses(&self, evaluation_id: i64) -> Result<i64>;
    // 列出回复原始数据（统计用）
    async fn list_responses(&self, evaluation_id: i64) -> Result<Vec<EvaluationResponse>>;
    // 列出回复并联查教师/科目/班级名称（报表与导出用）
    async fn list_responses_with_names(&self, evaluation_id: i64) -> Result<Vec<ResponseDetail>>;

    /// 访问码管理方法
    // 创建访问码：生成候选码并落库，唯一冲突时重新生成，最多 3 次
    async fn create_access_code(&self, evaluation_id: i64, class_name: String)
    -> Result<AccessCode>;
    async fn get_access_code_by_code(&self, code: &str) -> Result<Option<AccessCode>>;
    async fn get_access_code_by_id(&self, code_id: i64) -> Result<Option<AccessCode>>;
    async fn list_access_codes_by_evaluation(&self, evaluation_id: i64) -> Result<Vec<AccessCode>>;
    async fn delete_access_code(&self, code_id: i64) -> Result<bool>;
    async fn delete_access_codes_for_evaluation(&self, evaluation_id: i64) -> Result<u64>;
    // 统计访问码 (总数, 已使用数)
    async fn count_access_codes(&self, evaluation_id: i64) -> Result<(i64, i64)>;

    /// 核心提交事务
    ///
    /// 在单个数据库事务内完成：锁定访问码行 → 校验未使用 → 复查评价窗口 →
    /// 校验教师/科目/班级归属 → 写入回复 → 标记访问码已使用。
    /// 同一访问码并发提交时至多一个事务提交成功，败者得到 AccessCodeUsed。
    async fn submit_response(
        &self,
        evaluation_id: i64,
        request: SubmitResponseRequest,
    ) -> Result<EvaluationResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
