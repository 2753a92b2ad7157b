//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::errors::{EvalSystemError, Result};
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, UpdateClassRequest},
};
use crate::models::evaluations::entities::EvaluationStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(
        &self,
        school_id: i64,
        req: CreateClassRequest,
    ) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(school_id),
            name: Set(req.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出学校的全部班级
    pub async fn list_classes_by_school_impl(&self, school_id: i64) -> Result<Vec<Class>> {
        let result = Classes::find()
            .filter(Column::SchoolId.eq(school_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let existing = self.get_class_by_id_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(class_id),
            name: Set(update.name),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("更新班级失败: {e}")))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学校是否存在未结束的评价活动
    pub async fn school_has_open_evaluations_impl(
        &self,
        school_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<bool> {
        let count = Evaluations::find()
            .filter(EvaluationColumn::SchoolId.eq(school_id))
            .filter(EvaluationColumn::Status.eq(EvaluationStatus::Active.to_string()))
            .filter(EvaluationColumn::EndDate.gte(now.timestamp()))
            .count(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询评价活动失败: {e}")))?;

        Ok(count > 0)
    }
}
