use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 验证访问码成功后返回的评价上下文
//
// 客户端此后持有该码作为提交回复的凭证；验证本身不消耗访问码。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/access_code.ts")]
pub struct VerifyCodeResponse {
    pub access_code_id: i64,
    pub evaluation_id: i64,
    pub evaluation_name: String,
    pub class_name: String,
}
