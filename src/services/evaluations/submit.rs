//! 匿名回复提交服务
//!
//! 公开端点：由访问码本身把关，不要求会话令牌。业务规则失败（无效码、
//! 已用码、窗口关闭、引用不存在）一律 4xx 且不重试，事务细节见存储层。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EvaluationService;
use crate::errors::EvalSystemError;
use crate::models::evaluations::requests::SubmitResponseRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn submit_response(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
    response_data: SubmitResponseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 评分校验先行，不合法的请求不应触发任何数据库往返
    if let Err(msg) = response_data.criteria.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ResponseValidationFailed,
            msg,
        )));
    }

    match storage.submit_response(evaluation_id, response_data).await {
        Ok(response) => {
            info!(
                "Response {} recorded for evaluation {} (access code {})",
                response.id, evaluation_id, response.access_code_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(response, "Response recorded")))
        }
        Err(EvalSystemError::Validation(msg)) => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ResponseValidationFailed, msg),
        )),
        Err(EvalSystemError::AccessCodeInvalid(_)) => {
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AccessCodeNotFound,
                "Invalid access code",
            )))
        }
        Err(EvalSystemError::AccessCodeUsed(_)) => {
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AccessCodeUsed,
                "This access code has already been used",
            )))
        }
        Err(EvalSystemError::EvaluationClosed(_)) => {
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::EvaluationNotActive,
                "The evaluation is not currently accepting responses",
            )))
        }
        Err(EvalSystemError::ReferenceInvalid(msg)) => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ReferenceInvalid, msg),
        )),
        Err(EvalSystemError::NotFound(_)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::EvaluationNotFound, "Evaluation not found"),
        )),
        Err(e) => {
            error!("Response submission failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while recording response",
                )),
            )
        }
    }
}
