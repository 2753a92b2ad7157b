use serde::Deserialize;
use ts_rs::TS;

// 创建班级请求，school_id 语义与教师创建一致
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub school_id: Option<i64>,
}

// 更新班级请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: String,
}

// 班级列表查询参数（管理员用 school_id 指定学校，校长忽略）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassQueryParams {
    pub school_id: Option<i64>,
}

// 单条任课分配
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct AssignmentEntry {
    pub teacher_id: i64,
    pub subject_id: i64,
}

// 批量替换班级任课分配请求（先删后插，事务内执行）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateAssignmentsRequest {
    pub assignments: Vec<AssignmentEntry>,
}
