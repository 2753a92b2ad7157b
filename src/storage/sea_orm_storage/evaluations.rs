//! 评价活动存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::evaluation_responses::{
    Column as ResponseColumn, Entity as EvaluationResponses,
};
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::entity::{
    classes::{Column as ClassColumn, Entity as Classes},
    subjects::{Column as SubjectColumn, Entity as Subjects},
    teachers::{Column as TeacherColumn, Entity as Teachers},
};
use crate::errors::{EvalSystemError, Result};
use crate::models::{
    PaginationInfo,
    evaluations::{
        entities::{Evaluation, EvaluationResponse},
        requests::{CreateEvaluationRequest, EvaluationListQuery, UpdateEvaluationRequest},
        responses::{EvaluationListResponse, ResponseDetail},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建评价活动
    pub async fn create_evaluation_impl(
        &self,
        school_id: i64,
        req: CreateEvaluationRequest,
    ) -> Result<Evaluation> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(school_id),
            name: Set(req.name),
            description: Set(req.description),
            status: Set(crate::models::evaluations::entities::EvaluationStatus::Active.to_string()),
            start_date: Set(req.start_date.timestamp()),
            end_date: Set(req.end_date.timestamp()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("创建评价活动失败: {e}")))?;

        Ok(result.into_evaluation())
    }

    /// 通过 ID 获取评价活动
    pub async fn get_evaluation_by_id_impl(
        &self,
        evaluation_id: i64,
    ) -> Result<Option<Evaluation>> {
        let result = Evaluations::find_by_id(evaluation_id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询评价活动失败: {e}")))?;

        Ok(result.map(|m| m.into_evaluation()))
    }

    /// 分页列出评价活动
    pub async fn list_evaluations_with_pagination_impl(
        &self,
        query: EvaluationListQuery,
    ) -> Result<EvaluationListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Evaluations::find();

        // 学校筛选
        if let Some(school_id) = query.school_id {
            select = select.filter(Column::SchoolId.eq(school_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            EvalSystemError::database_operation(format!("查询评价活动总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            EvalSystemError::database_operation(format!("查询评价活动页数失败: {e}"))
        })?;

        let evaluations = paginator.fetch_page(page - 1).await.map_err(|e| {
            EvalSystemError::database_operation(format!("查询评价活动列表失败: {e}"))
        })?;

        Ok(EvaluationListResponse {
            items: evaluations
                .into_iter()
                .map(|m| m.into_evaluation())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新评价活动
    pub async fn update_evaluation_impl(
        &self,
        evaluation_id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<Evaluation>> {
        let existing = self.get_evaluation_by_id_impl(evaluation_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(evaluation_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date.timestamp());
        }

        if let Some(end_date) = update.end_date {
            model.end_date = Set(end_date.timestamp());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("更新评价活动失败: {e}")))?;

        self.get_evaluation_by_id_impl(evaluation_id).await
    }

    /// 删除评价活动
    ///
    /// 存在回复时的守卫由服务层执行；此处只做物理删除，
    /// 访问码与回复通过外键级联一并删除。
    pub async fn delete_evaluation_impl(&self, evaluation_id: i64) -> Result<bool> {
        let result = Evaluations::delete_by_id(evaluation_id)
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除评价活动失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计评价活动的回复总数
    pub async fn count_responses_impl(&self, evaluation_id: i64) -> Result<i64> {
        let count = EvaluationResponses::find()
            .filter(ResponseColumn::EvaluationId.eq(evaluation_id))
            .count(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("统计回复总数失败: {e}")))?;

        Ok(count as i64)
    }

    /// 列出评价活动的全部回复
    pub async fn list_responses_impl(&self, evaluation_id: i64) -> Result<Vec<EvaluationResponse>> {
        let result = EvaluationResponses::find()
            .filter(ResponseColumn::EvaluationId.eq(evaluation_id))
            .order_by_desc(ResponseColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询回复列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_response()).collect())
    }

    /// 列出回复并联查教师/科目/班级名称
    pub async fn list_responses_with_names_impl(
        &self,
        evaluation_id: i64,
    ) -> Result<Vec<ResponseDetail>> {
        let responses = EvaluationResponses::find()
            .filter(ResponseColumn::EvaluationId.eq(evaluation_id))
            .order_by_desc(ResponseColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询回复列表失败: {e}")))?;

        if responses.is_empty() {
            return Ok(vec![]);
        }

        let teacher_ids: Vec<i64> = responses.iter().map(|r| r.teacher_id).collect();
        let subject_ids: Vec<i64> = responses.iter().map(|r| r.subject_id).collect();
        let class_ids: Vec<i64> = responses.iter().map(|r| r.class_id).collect();

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

        let class_names: HashMap<i64, String> = Classes::find()
            .filter(ClassColumn::Id.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询班级失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(responses
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
                let class_name = class_names
                    .get(&model.class_id)
                    .cloned()
                    .unwrap_or_default();
                ResponseDetail {
                    response: model.into_response(),
                    teacher_name,
                    subject_name,
                    class_name,
                }
            })
            .collect())
    }
}
