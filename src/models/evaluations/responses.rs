use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Evaluation, EvaluationResponse};
use crate::models::PaginationInfo;

// 评价活动列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListResponse {
    pub items: Vec<Evaluation>,
    pub pagination: PaginationInfo,
}

// 回复详情（带教师、科目、班级名称，供报表与导出使用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ResponseDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub response: EvaluationResponse,
    pub teacher_name: String,
    pub subject_name: String,
    pub class_name: String,
}

// 各项评分的平均值；无回复时全部为 0，不输出 NaN
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct AverageScores {
    pub preparation: f64,
    pub explanation: f64,
    pub engagement: f64,
    pub atmosphere: f64,
    pub individual: f64,
}

// 评价活动统计响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationStatsResponse {
    pub total_responses: i64,
    pub average_scores: AverageScores,
    // 已使用访问码 / 全部访问码，无访问码时为 0
    pub completion_rate: f64,
}
