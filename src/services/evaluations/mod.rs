pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod responses;
pub mod stats;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::evaluations::requests::{
    CreateEvaluationRequest, EvaluationQueryParams, SubmitResponseRequest, UpdateEvaluationRequest,
};
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取评价活动列表
    pub async fn list_evaluations(
        &self,
        request: &HttpRequest,
        query: EvaluationQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_evaluations(self, request, query).await
    }

    // 获取评价活动详情
    pub async fn get_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_evaluation(self, request, evaluation_id).await
    }

    pub async fn create_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_data: CreateEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_evaluation(self, request, evaluation_data).await
    }

    // 更新评价活动
    pub async fn update_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        update_data: UpdateEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_evaluation(self, request, evaluation_id, update_data).await
    }

    // 删除评价活动（存在回复时拒绝）
    pub async fn delete_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_evaluation(self, request, evaluation_id).await
    }

    // 提交匿名回复（公开端点，核心事务）
    pub async fn submit_response(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        response_data: SubmitResponseRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_response(self, request, evaluation_id, response_data).await
    }

    // 列出回复（带名称联查）
    pub async fn list_responses(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        responses::list_responses(self, request, evaluation_id).await
    }

    // 统计
    pub async fn get_stats(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        stats::get_evaluation_stats(self, request, evaluation_id).await
    }

    // CSV 导出
    pub async fn export_csv(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        export::export_csv(self, request, evaluation_id).await
    }

    // PDF 导出（外部渲染服务）
    pub async fn export_pdf(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        export::export_pdf(self, request, evaluation_id).await
    }
}
