use serde::Deserialize;
use ts_rs::TS;

// 创建科目请求，school_id 语义与教师创建一致
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub school_id: Option<i64>,
}

// 更新科目请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: String,
}

// 科目列表查询参数（管理员用 school_id 指定学校，校长忽略）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectQueryParams {
    pub school_id: Option<i64>,
}
