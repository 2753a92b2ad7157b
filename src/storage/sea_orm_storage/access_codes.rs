//! 访问码存储操作

use super::SeaOrmStorage;
use crate::entity::access_codes::{ActiveModel, Column, Entity as AccessCodes};
use crate::errors::{EvalSystemError, Result};
use crate::models::access_codes::entities::AccessCode;
use crate::utils::random_code::generate_access_code;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use tracing::warn;

/// 生成唯一访问码的尝试上限
///
/// 32^6 的码空间下冲突概率可忽略，此上限只是防御性兜底。
const MAX_CODE_ATTEMPTS: usize = 3;

impl SeaOrmStorage {
    /// 创建访问码
    ///
    /// 生成候选码并落库；code 列的唯一索引拒绝重复时换一个新码重试，
    /// 共尝试 MAX_CODE_ATTEMPTS 次，全部冲突视为服务器故障上报。
    pub async fn create_access_code_impl(
        &self,
        evaluation_id: i64,
        class_name: String,
    ) -> Result<AccessCode> {
        let now = chrono::Utc::now().timestamp();

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_access_code();

            let model = ActiveModel {
                evaluation_id: Set(evaluation_id),
                code: Set(code),
                class_name: Set(class_name.clone()),
                is_used: Set(false),
                created_at: Set(now),
                ..Default::default()
            };

            match model.insert(&self.db).await {
                Ok(result) => return Ok(result.into_access_code()),
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    warn!(
                        "Access code collision on attempt {}/{}, regenerating",
                        attempt, MAX_CODE_ATTEMPTS
                    );
                    continue;
                }
                Err(e) => {
                    return Err(EvalSystemError::database_operation(format!(
                        "创建访问码失败: {e}"
                    )));
                }
            }
        }

        Err(EvalSystemError::access_code_exhausted(format!(
            "生成唯一访问码失败，已尝试 {MAX_CODE_ATTEMPTS} 次"
        )))
    }

    /// 通过码字符串精确查找访问码
    pub async fn get_access_code_by_code_impl(&self, code: &str) -> Result<Option<AccessCode>> {
        let result = AccessCodes::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询访问码失败: {e}")))?;

        Ok(result.map(|m| m.into_access_code()))
    }

    /// 通过 ID 获取访问码
    pub async fn get_access_code_by_id_impl(&self, code_id: i64) -> Result<Option<AccessCode>> {
        let result = AccessCodes::find_by_id(code_id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询访问码失败: {e}")))?;

        Ok(result.map(|m| m.into_access_code()))
    }

    /// 列出评价活动的全部访问码（最新优先）
    pub async fn list_access_codes_by_evaluation_impl(
        &self,
        evaluation_id: i64,
    ) -> Result<Vec<AccessCode>> {
        let result = AccessCodes::find()
            .filter(Column::EvaluationId.eq(evaluation_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询访问码列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_access_code()).collect())
    }

    /// 删除单个访问码
    pub async fn delete_access_code_impl(&self, code_id: i64) -> Result<bool> {
        let result = AccessCodes::delete_by_id(code_id)
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除访问码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除评价活动的全部访问码
    pub async fn delete_access_codes_for_evaluation_impl(
        &self,
        evaluation_id: i64,
    ) -> Result<u64> {
        let result = AccessCodes::delete_many()
            .filter(Column::EvaluationId.eq(evaluation_id))
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除访问码失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 统计访问码 (总数, 已使用数)
    pub async fn count_access_codes_impl(&self, evaluation_id: i64) -> Result<(i64, i64)> {
        let total = AccessCodes::find()
            .filter(Column::EvaluationId.eq(evaluation_id))
            .count(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("统计访问码失败: {e}")))?;

        let used = AccessCodes::find()
            .filter(Column::EvaluationId.eq(evaluation_id))
            .filter(Column::IsUsed.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("统计访问码失败: {e}")))?;

        Ok((total as i64, used as i64))
    }
}
