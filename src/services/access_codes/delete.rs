use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AccessCodeService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::scope::check_school_access;

pub async fn delete_code(
    service: &AccessCodeService,
    request: &HttpRequest,
    code_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    // 通过访问码所属的评价活动做学校范围校验
    let access_code = match storage.get_access_code_by_id(code_id).await {
        Ok(Some(access_code)) => access_code,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AccessCodeNotFound,
                "Access code not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to fetch access code: {e}"),
                )),
            );
        }
    };

    match storage.get_evaluation_by_id(access_code.evaluation_id).await {
        Ok(Some(evaluation)) => {
            if let Err(resp) = check_school_access(&user, evaluation.school_id) {
                return Ok(resp);
            }
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to fetch evaluation: {e}"),
                )),
            );
        }
    }

    match storage.delete_access_code(code_id).await {
        Ok(true) => {
            info!("Access code {} deleted by user {}", code_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Access code deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AccessCodeNotFound,
            "Access code not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete access code: {e}"),
            )),
        ),
    }
}

pub async fn delete_all_codes(
    service: &AccessCodeService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    let evaluation = match storage.get_evaluation_by_id(evaluation_id).await {
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

    if let Err(resp) = check_school_access(&user, evaluation.school_id) {
        return Ok(resp);
    }

    match storage
        .delete_access_codes_for_evaluation(evaluation_id)
        .await
    {
        Ok(count) => {
            info!(
                "Deleted {} access codes for evaluation {} by user {}",
                count, evaluation_id, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Access codes deleted")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete access codes: {e}"),
            )),
        ),
    }
}
