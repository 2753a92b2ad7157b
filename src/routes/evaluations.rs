use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::evaluations::requests::{
    CreateEvaluationRequest, EvaluationQueryParams, SubmitResponseRequest, UpdateEvaluationRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::EvaluationService;
use crate::utils::SafeEvaluationIdI64;

// 懒加载的全局 EVALUATION_SERVICE 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// HTTP处理程序
pub async fn list_evaluations(
    req: HttpRequest,
    query: web::Query<EvaluationQueryParams>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_evaluations(&req, query.into_inner())
        .await
}

pub async fn create_evaluation(
    req: HttpRequest,
    evaluation_data: web::Json<CreateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .create_evaluation(&req, evaluation_data.into_inner())
        .await
}

pub async fn get_evaluation(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .get_evaluation(&req, evaluation_id.0)
        .await
}

pub async fn update_evaluation(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
    update_data: web::Json<UpdateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .update_evaluation(&req, evaluation_id.0, update_data.into_inner())
        .await
}

pub async fn delete_evaluation(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .delete_evaluation(&req, evaluation_id.0)
        .await
}

pub async fn submit_response(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
    response_data: web::Json<SubmitResponseRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .submit_response(&req, evaluation_id.0, response_data.into_inner())
        .await
}

pub async fn list_responses(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_responses(&req, evaluation_id.0)
        .await
}

pub async fn get_stats(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.get_stats(&req, evaluation_id.0).await
}

pub async fn export_csv(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.export_csv(&req, evaluation_id.0).await
}

pub async fn export_pdf(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.export_pdf(&req, evaluation_id.0).await
}

// 配置路由
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    // 回复提交由访问码把关，无需会话令牌；回复查询仍要求登录
    cfg.service(
        web::resource("/api/v1/evaluations/{evaluation_id}/responses")
            .route(
                web::post()
                    .to(submit_response)
                    .wrap(middlewares::RateLimit::submit_response()),
            )
            .route(
                web::get()
                    .to(list_responses)
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .wrap(middlewares::RequireJWT),
            ),
    );

    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_evaluations))
                    .route(web::post().to(create_evaluation)),
            )
            .service(
                web::resource("/{evaluation_id}")
                    .route(web::get().to(get_evaluation))
                    .route(web::put().to(update_evaluation))
                    .route(web::delete().to(delete_evaluation)),
            )
            .service(web::resource("/{evaluation_id}/stats").route(web::get().to(get_stats)))
            .service(web::resource("/{evaluation_id}/export/csv").route(web::get().to(export_csv)))
            .service(web::resource("/{evaluation_id}/export/pdf").route(web::get().to(export_pdf))),
    );
}
