//! 回复提交事务
//!
//! 整个系统唯一真正的并发风险点：两个请求用同一访问码竞速提交时，
//! 不允许两者都成功。串行化完全依赖数据库的行锁与唯一索引，
//! 不用进程内互斥——多个服务实例并存时只有共享数据库能跨实例仲裁。

use super::SeaOrmStorage;
use crate::entity::access_codes::{
    ActiveModel as AccessCodeActiveModel, Column as AccessCodeColumn, Entity as AccessCodes,
};
use crate::entity::evaluation_responses::ActiveModel as ResponseActiveModel;
use crate::entity::evaluations::Entity as Evaluations;
use crate::entity::{
    classes::{Column as ClassColumn, Entity as Classes},
    subjects::{Column as SubjectColumn, Entity as Subjects},
    teachers::{Column as TeacherColumn, Entity as Teachers},
};
use crate::errors::{EvalSystemError, Result};
use crate::models::evaluations::{
    entities::EvaluationResponse, requests::SubmitResponseRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set, SqlErr, TransactionTrait,
};

impl SeaOrmStorage {
    /// 提交一条评价回复并消耗访问码
    ///
    /// 不变量：对固定的访问码，无论并发多少请求，至多一条回复提交成功；
    /// 事务中任何一步失败都回滚，不会出现已消耗的码没有回复（或反之）。
    pub async fn submit_response_impl(
        &self,
        evaluation_id: i64,
        req: SubmitResponseRequest,
    ) -> Result<EvaluationResponse> {
        // 1. 评分校验，在任何 I/O 之前拒绝非法输入
        req.criteria
            .validate()
            .map_err(EvalSystemError::validation)?;

        let criteria_json = serde_json::to_value(&req.criteria)
            .map_err(|e| EvalSystemError::serialization(format!("序列化评分失败: {e}")))?;
        let now = chrono::Utc::now();

        // 2. 开启事务
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("开启事务失败: {e}")))?;

        // 3. 锁定访问码行（SELECT ... FOR UPDATE），并发提交在此串行化
        let code = AccessCodes::find_by_id(req.access_code_id)
            .filter(AccessCodeColumn::EvaluationId.eq(evaluation_id))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("锁定访问码失败: {e}")))?;

        let Some(code) = code else {
            txn.rollback().await.ok();
            return Err(EvalSystemError::access_code_invalid(
                "访问码不存在或不属于该评价活动",
            ));
        };

        // 4. 已使用即终止，竞速中的败者走到这里
        if code.is_used {
            txn.rollback().await.ok();
            return Err(EvalSystemError::access_code_used("该访问码已被使用"));
        }

        // 5. 复查评价窗口，验证与提交之间窗口可能已关闭
        let evaluation = Evaluations::find_by_id(evaluation_id)
            .one(&txn)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询评价活动失败: {e}")))?;

        let Some(evaluation) = evaluation.map(|m| m.into_evaluation()) else {
            txn.rollback().await.ok();
            return Err(EvalSystemError::not_found("评价活动不存在"));
        };

        if !evaluation.is_accepting_responses(now) {
            txn.rollback().await.ok();
            return Err(EvalSystemError::evaluation_closed("评价活动不在开放窗口内"));
        }

        // 6. 校验教师/科目/班级存在且属于评价所在学校
        if let Err(e) = Self::check_references(&txn, evaluation.school_id, &req).await {
            txn.rollback().await.ok();
            return Err(e);
        }

        // 7. 写入回复
        let model = ResponseActiveModel {
            evaluation_id: Set(evaluation_id),
            teacher_id: Set(req.teacher_id),
            subject_id: Set(req.subject_id),
            class_id: Set(req.class_id),
            access_code_id: Set(code.id),
            criteria: Set(criteria_json),
            comment: Set(req.comment),
            created_at: Set(now.timestamp()),
            ..Default::default()
        };

        let inserted = match model.insert(&txn).await {
            Ok(inserted) => inserted,
            // access_code_id 的唯一索引是行锁之外的第二道防线
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                txn.rollback().await.ok();
                return Err(EvalSystemError::access_code_used("该访问码已被使用"));
            }
            Err(e) => {
                txn.rollback().await.ok();
                return Err(EvalSystemError::database_operation(format!(
                    "写入回复失败: {e}"
                )));
            }
        };

        // 8. 标记访问码已使用，unused -> used 只发生这一次
        let code_update = AccessCodeActiveModel {
            id: Set(code.id),
            is_used: Set(true),
            ..Default::default()
        };

        if let Err(e) = code_update.update(&txn).await {
            txn.rollback().await.ok();
            return Err(EvalSystemError::database_operation(format!(
                "标记访问码失败: {e}"
            )));
        }

        // 9. 提交
        txn.commit()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(inserted.into_response())
    }

    /// 校验回复引用的教师/科目/班级都存在于指定学校
    async fn check_references(
        txn: &DatabaseTransaction,
        school_id: i64,
        req: &SubmitResponseRequest,
    ) -> Result<()> {
        let teacher_exists = Teachers::find_by_id(req.teacher_id)
            .filter(TeacherColumn::SchoolId.eq(school_id))
            .count(txn)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询教师失败: {e}")))?
            > 0;

        if !teacher_exists {
            return Err(EvalSystemError::reference_invalid("教师不存在"));
        }

        let subject_exists = Subjects::find_by_id(req.subject_id)
            .filter(SubjectColumn::SchoolId.eq(school_id))
            .count(txn)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询科目失败: {e}")))?
            > 0;

        if !subject_exists {
            return Err(EvalSystemError::reference_invalid("科目不存在"));
        }

        let class_exists = Classes::find_by_id(req.class_id)
            .filter(ClassColumn::SchoolId.eq(school_id))
            .count(txn)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询班级失败: {e}")))?
            > 0;

        if !class_exists {
            return Err(EvalSystemError::reference_invalid("班级不存在"));
        }

        Ok(())
    }
}
