use serde::Deserialize;
use ts_rs::TS;

// 批量生成访问码请求：每个班级名生成一个码
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/access_code.ts")]
pub struct GenerateCodesRequest {
    pub classes: Vec<String>,
}

// 验证访问码请求（公开端点）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/access_code.ts")]
pub struct VerifyCodeRequest {
    pub code: String,
}
