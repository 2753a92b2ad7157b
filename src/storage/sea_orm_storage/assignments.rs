//! 任课分配存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::teacher_assignments::{ActiveModel, Column, Entity as TeacherAssignments};
use crate::entity::{
    subjects::{Column as SubjectColumn, Entity as Subjects},
    teachers::{Column as TeacherColumn, Entity as Teachers},
};
use crate::errors::{EvalSystemError, Result};
use crate::models::classes::{requests::AssignmentEntry, responses::AssignmentDetail};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 列出班级的任课分配（带教师与科目名称）
    pub async fn list_assignments_by_class_impl(
        &self,
        class_id: i64,
    ) -> Result<Vec<AssignmentDetail>> {
        let assignments = TeacherAssignments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询任课分配失败: {e}")))?;

        if assignments.is_empty() {
            return Ok(vec![]);
        }

        // 一次性取出涉及的教师与科目，按 ID 建表
        let teacher_ids: Vec<i64> = assignments.iter().map(|a| a.teacher_id).collect();
        let subject_ids: Vec<i64> = assignments.iter().map(|a| a.subject_id).collect();

        let teacher_names: HashMap<i64, String> = Teachers::find()
            .filter(TeacherColumn::Id.is_in(teacher_ids))
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询教师失败: {e}")))?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();

        let subject_names: HashMap<i64, String> = Subjects::find()
            .filter(SubjectColumn::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询科目失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        Ok(assignments
            .into_iter()
            .map(|model| {
                let teacher_name = teacher_names
                    .get(&model.teacher_id)
                    .cloned()
                    .unwrap_or_default();
                let subject_name = subject_names
                    .get(&model.subject_id)
                    .cloned()
                    .unwrap_or_default();
                AssignmentDetail {
                    assignment: model.into_assignment(),
                    teacher_name,
                    subject_name,
                }
            })
            .collect())
    }

    /// 批量替换班级的任课分配
    ///
    /// 事务内先删除旧分配再写入新分配，失败时整体回滚。
    pub async fn replace_assignments_impl(
        &self,
        class_id: i64,
        assignments: Vec<AssignmentEntry>,
    ) -> Result<u64> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("开启事务失败: {e}")))?;

        TeacherAssignments::delete_many()
            .filter(Column::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("清空任课分配失败: {e}")))?;

        let mut inserted = 0u64;
        for entry in assignments {
            let model = ActiveModel {
                class_id: Set(class_id),
                teacher_id: Set(entry.teacher_id),
                subject_id: Set(entry.subject_id),
                created_at: Set(now),
                ..Default::default()
            };

            model.insert(&txn).await.map_err(|e| {
                EvalSystemError::database_operation(format!("写入任课分配失败: {e}"))
            })?;
            inserted += 1;
        }

        txn.commit()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(inserted)
    }

    /// 删除单条任课分配
    pub async fn delete_assignment_impl(&self, class_id: i64, assignment_id: i64) -> Result<bool> {
        let result = TeacherAssignments::delete_many()
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::ClassId.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除任课分配失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
