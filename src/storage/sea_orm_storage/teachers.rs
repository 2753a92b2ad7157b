//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{EvalSystemError, Result};
use crate::models::teachers::entities::Teacher;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, school_id: i64, name: String) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(school_id),
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 列出学校的全部教师
    pub async fn list_teachers_by_school_impl(&self, school_id: i64) -> Result<Vec<Teacher>> {
        let result = Teachers::find()
            .filter(Column::SchoolId.eq(school_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_teacher()).collect())
    }

    /// 更新教师信息
    pub async fn update_teacher_impl(
        &self,
        teacher_id: i64,
        name: String,
    ) -> Result<Option<Teacher>> {
        let existing = self.get_teacher_by_id_impl(teacher_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(teacher_id),
            name: Set(name),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("更新教师失败: {e}")))?;

        self.get_teacher_by_id_impl(teacher_id).await
    }

    /// 删除教师
    pub async fn delete_teacher_impl(&self, teacher_id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(teacher_id)
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
