use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::TeacherAssignment;

// 任课分配详情（带教师与科目名称，供学生端表单直接渲染）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct AssignmentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: TeacherAssignment,
    pub teacher_name: String,
    pub subject_name: String,
}
