use serde::Deserialize;
use ts_rs::TS;

// 创建教师请求
//
// # school_id 字段说明
// - 校长创建：省略，自动使用自己绑定的学校
// - 管理员创建：必填，指定目标学校
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    pub name: String,
    pub school_id: Option<i64>,
}

// 更新教师请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeacherRequest {
    pub name: String,
}

// 教师列表查询参数（管理员用 school_id 指定学校，校长忽略）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherQueryParams {
    pub school_id: Option<i64>,
}
