use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::access_codes::requests::{GenerateCodesRequest, VerifyCodeRequest};
use crate::models::users::entities::UserRole;
use crate::services::AccessCodeService;
use crate::utils::{SafeCodeIdI64, SafeEvaluationIdI64};

// 懒加载的全局 ACCESS_CODE_SERVICE 实例
static ACCESS_CODE_SERVICE: Lazy<AccessCodeService> = Lazy::new(AccessCodeService::new_lazy);

// HTTP处理程序
pub async fn generate_codes(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
    generate_data: web::Json<GenerateCodesRequest>,
) -> ActixResult<HttpResponse> {
    ACCESS_CODE_SERVICE
        .generate_codes(&req, evaluation_id.0, generate_data.into_inner())
        .await
}

pub async fn verify_code(
    req: HttpRequest,
    verify_data: web::Json<VerifyCodeRequest>,
) -> ActixResult<HttpResponse> {
    ACCESS_CODE_SERVICE
        .verify_code(&req, verify_data.into_inner())
        .await
}

pub async fn list_codes(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    ACCESS_CODE_SERVICE.list_codes(&req, evaluation_id.0).await
}

pub async fn delete_code(req: HttpRequest, code_id: SafeCodeIdI64) -> ActixResult<HttpResponse> {
    ACCESS_CODE_SERVICE.delete_code(&req, code_id.0).await
}

pub async fn delete_all_codes(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    ACCESS_CODE_SERVICE
        .delete_all_codes(&req, evaluation_id.0)
        .await
}

// 配置路由
pub fn configure_access_code_routes(cfg: &mut web::ServiceConfig) {
    // 学生验证访问码：公开端点，速率限制压制暴力枚举
    cfg.service(
        web::resource("/api/v1/access-codes/verify")
            .route(web::post().to(verify_code))
            .wrap(middlewares::RateLimit::verify_code()),
    );

    cfg.service(
        web::scope("/api/v1/access-codes")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/evaluation/{evaluation_id}/codes")
                    .route(web::post().to(generate_codes))
                    .route(web::get().to(list_codes))
                    .route(web::delete().to(delete_all_codes)),
            )
            .service(web::resource("/{code_id}").route(web::delete().to(delete_code))),
    );
}
