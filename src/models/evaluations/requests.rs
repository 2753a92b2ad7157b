use serde::Deserialize;
use ts_rs::TS;

use super::entities::{CriteriaScores, EvaluationStatus};
use crate::models::common::PaginationQuery;

// 创建评价活动请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CreateEvaluationRequest {
    pub name: String,
    pub description: Option<String>,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    // 管理员代学校创建时必填，校长省略
    pub school_id: Option<i64>,
}

// 更新评价活动请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct UpdateEvaluationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<EvaluationStatus>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
}

// 评价活动查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    // 管理员可按学校筛选；校长忽略，总是限定在自己的学校
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_string_to_i64"
    )]
    pub school_id: Option<i64>,
}

// 评价活动列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct EvaluationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub school_id: Option<i64>,
    pub search: Option<String>,
}

// 提交评价回复请求（公开端点，由访问码而非会话令牌把关）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct SubmitResponseRequest {
    pub teacher_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub access_code_id: i64,
    pub criteria: CriteriaScores,
    pub comment: Option<String>,
}
