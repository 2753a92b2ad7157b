use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::AccessCodeService;
use crate::models::access_codes::{requests::VerifyCodeRequest, responses::VerifyCodeResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 验证访问码
///
/// 只做校验，不消耗：码在回复提交事务中才翻转为已使用。
/// 窗口在验证与提交之间可能关闭，提交路径会再查一次。
pub async fn verify_code(
    service: &AccessCodeService,
    request: &HttpRequest,
    verify_data: VerifyCodeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let code = verify_data.code.trim().to_uppercase();
    if code.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Access code must not be blank",
        )));
    }

    let access_code = match storage.get_access_code_by_code(&code).await {
        Ok(Some(access_code)) => access_code,
        Ok(None) => {
            debug!("Access code verification failed: unknown code");
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AccessCodeNotFound,
                "Invalid access code",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to verify access code: {e}"),
                )),
            );
        }
    };

    if access_code.is_used {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AccessCodeUsed,
            "This access code has already been used",
        )));
    }

    // 评价窗口检查
    let evaluation = match storage.get_evaluation_by_id(access_code.evaluation_id).await {
        Ok(Some(evaluation)) => evaluation,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EvaluationNotFound,
                "Evaluation not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to fetch evaluation: {e}"),
                )),
            );
        }
    };

    if !evaluation.is_accepting_responses(chrono::Utc::now()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EvaluationNotActive,
            "The evaluation is not currently accepting responses",
        )));
    }

    let response = VerifyCodeResponse {
        access_code_id: access_code.id,
        evaluation_id: evaluation.id,
        evaluation_name: evaluation.name,
        class_name: access_code.class_name,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Access code is valid")))
}
