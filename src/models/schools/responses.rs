use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::School;
use crate::models::PaginationInfo;

// 学校列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/school.ts")]
pub struct SchoolListResponse {
    pub items: Vec<School>,
    pub pagination: PaginationInfo,
}
