use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 访问码实体
//
// 一次性凭证：unused -> used 仅发生一次，由回复提交事务负责翻转。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/access_code.ts")]
pub struct AccessCode {
    pub id: i64,
    pub evaluation_id: i64,
    pub code: String,
    pub class_name: String,
    pub is_used: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
